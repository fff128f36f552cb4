//! # Formula parser and canonicalizer
//!
//! Turns a raw chemical formula such as `"Ca(ClO4)2"` into an [`ElementCounts`] map and
//! writes it back in a single canonical spelling.
//!
//! ## Grammar
//! - `(` opens a group; the matching `)` is found by depth counting. The inside of the group
//!   is parsed recursively and every count is multiplied by the digits after `)` (default 1).
//! - An uppercase letter starts an element symbol, extended greedily by lowercase letters.
//!   The symbol must be whitelisted. Digits after it are its count (default 1).
//! - Anything else (lowercase-first tokens, whitespace, stray `)`, leading digits) is rejected.
//! - Groups may nest up to [`MAX_NESTING`] levels.
//!
//! Repeated occurrences of one element are summed, also across groups, so `"CH3COOH"` and
//! `"C2H4O2"` are the same identity.
//!
//! ## Canonical form
//! Elements in ascending rank (atomic number), `<Symbol><Count>` with the count omitted when
//! it is 1. Parsing a canonical string reproduces the same map.
//! ```
//! use ElectroBase::Chemistry::formula::{canonical_form, parse_formula};
//! let counts = parse_formula("Ca(ClO4)2").unwrap();
//! assert_eq!(canonical_form(&counts), "O8Cl2Ca");
//! assert_eq!(parse_formula("O8Cl2Ca").unwrap(), counts);
//! ```
use crate::Chemistry::elements::Element;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// why a formula was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("unbalanced grouping")]
    UnbalancedGrouping,
    #[error("unknown element {0}")]
    UnknownElement(String),
    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
    #[error("zero multiplier at position {position}")]
    ZeroMultiplier { position: usize },
    #[error("element count overflow")]
    CountOverflow,
    #[error("groups nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
    #[error("formula contains no elements")]
    Empty,
}

/// Caller input error: the formula could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed formula '{formula}': {reason}")]
pub struct MalformedFormula {
    pub formula: String,
    pub reason: MalformedReason,
}

/// Element symbol -> number of atoms. Every count is at least 1.
///
/// Equality and hashing are structural over the map, which is the chemical identity of a
/// formula. Iteration order is canonical (ascending rank).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementCounts(BTreeMap<Element, usize>);

impl ElementCounts {
    pub fn get(&self, element: Element) -> usize {
        self.0.get(&element).copied().unwrap_or(0)
    }

    /// count by symbol; unknown symbols count 0
    pub fn count_of(&self, symbol: &str) -> usize {
        Element::from_symbol(symbol).map_or(0, |e| self.get(e))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Element, usize> {
        self.0.iter()
    }

    /// number of distinct elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` if the sum does not fit in `usize`
    pub fn total_atoms(&self) -> Option<usize> {
        self.0
            .values()
            .try_fold(0usize, |total, &count| total.checked_add(count))
    }

    /// molar mass in g/mol from standard atomic weights
    pub fn molar_mass(&self) -> f64 {
        self.0
            .iter()
            .map(|(element, &count)| element.atomic_mass() * count as f64)
            .sum()
    }

    /// symbol -> count, in canonical order
    pub fn to_symbol_map(&self) -> BTreeMap<&'static str, usize> {
        self.0.iter().map(|(e, &c)| (e.symbol(), c)).collect()
    }
}

impl fmt::Display for ElementCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (element, &count) in self.0.iter() {
            if count == 1 {
                write!(f, "{}", element)?;
            } else {
                write!(f, "{}{}", element, count)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ElementCounts {
    type Err = MalformedFormula;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_formula(s)
    }
}

/// Parses a formula into its element counts.
pub fn parse_formula(formula: &str) -> Result<ElementCounts, MalformedFormula> {
    let parser = FormulaParser::new(formula);
    let counts = parser
        .parse_span(0, parser.chars.len(), 0)
        .and_then(|counts| {
            if counts.is_empty() {
                Err(MalformedReason::Empty)
            } else {
                Ok(counts)
            }
        })
        .map_err(|reason| MalformedFormula {
            formula: formula.to_string(),
            reason,
        })?;
    Ok(ElementCounts(counts))
}

/// Canonical spelling of an element-count map.
pub fn canonical_form(counts: &ElementCounts) -> String {
    counts.to_string()
}

/// Parses and re-serializes in one step.
pub fn canonicalize(formula: &str) -> Result<String, MalformedFormula> {
    parse_formula(formula).map(|counts| canonical_form(&counts))
}

/// deepest group nesting accepted by the parser
pub const MAX_NESTING: usize = 64;

struct FormulaParser {
    chars: Vec<char>,
    /// for every `(`, the position of its `)`; `None` everywhere else or if unclosed
    closing: Vec<Option<usize>>,
}

impl FormulaParser {
    fn new(formula: &str) -> Self {
        let chars: Vec<char> = formula.chars().collect();
        let mut closing = vec![None; chars.len()];
        let mut open = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            match c {
                '(' => open.push(i),
                ')' => {
                    // a stray `)` stays unmatched and is reported where the parser meets it
                    if let Some(start) = open.pop() {
                        closing[start] = Some(i);
                    }
                }
                _ => {}
            }
        }
        FormulaParser { chars, closing }
    }

    // parses chars[start..end]; positions in errors are absolute char offsets
    fn parse_span(
        &self,
        start: usize,
        end: usize,
        depth: usize,
    ) -> Result<BTreeMap<Element, usize>, MalformedReason> {
        let mut counts: BTreeMap<Element, usize> = BTreeMap::new();
        let mut i = start;
        while i < end {
            let c = self.chars[i];
            if c == '(' {
                let close = self.matching_bracket(i, end)?;
                if depth >= MAX_NESTING {
                    return Err(MalformedReason::NestingTooDeep { max: MAX_NESTING });
                }
                let inner = self.parse_span(i + 1, close, depth + 1)?;
                let (multiplier, next) = self.read_multiplier(close + 1, end)?;
                for (element, count) in inner {
                    let scaled = count
                        .checked_mul(multiplier)
                        .ok_or(MalformedReason::CountOverflow)?;
                    add_count(&mut counts, element, scaled)?;
                }
                i = next;
            } else if c.is_ascii_uppercase() {
                let mut j = i + 1;
                while j < end && self.chars[j].is_ascii_lowercase() {
                    j += 1;
                }
                let symbol: String = self.chars[i..j].iter().collect();
                let element = Element::from_symbol(&symbol)
                    .ok_or(MalformedReason::UnknownElement(symbol))?;
                let (multiplier, next) = self.read_multiplier(j, end)?;
                add_count(&mut counts, element, multiplier)?;
                i = next;
            } else {
                return Err(MalformedReason::InvalidCharacter { ch: c, position: i });
            }
        }
        Ok(counts)
    }

    /// position of the `)` closing the group opened at `open`
    fn matching_bracket(&self, open: usize, end: usize) -> Result<usize, MalformedReason> {
        match self.closing[open] {
            Some(close) if close < end => Ok(close),
            _ => Err(MalformedReason::UnbalancedGrouping),
        }
    }

    /// digits starting at `start`; returns (value, position after the digits), 1 if none
    fn read_multiplier(&self, start: usize, end: usize) -> Result<(usize, usize), MalformedReason> {
        let mut j = start;
        let mut value: usize = 0;
        while j < end {
            let Some(digit) = self.chars[j].to_digit(10) else {
                break;
            };
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .ok_or(MalformedReason::CountOverflow)?;
            j += 1;
        }
        if j == start {
            return Ok((1, j));
        }
        if value == 0 {
            return Err(MalformedReason::ZeroMultiplier { position: start });
        }
        Ok((value, j))
    }
}

fn add_count(
    counts: &mut BTreeMap<Element, usize>,
    element: Element,
    count: usize,
) -> Result<(), MalformedReason> {
    let entry = counts.entry(element).or_insert(0);
    *entry = entry
        .checked_add(count)
        .ok_or(MalformedReason::CountOverflow)?;
    Ok(())
}
