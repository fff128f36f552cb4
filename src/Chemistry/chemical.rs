use crate::Chemistry::formula::{ElementCounts, MalformedFormula, canonical_form, parse_formula};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A component type: a parsed formula plus descriptive metadata.
///
/// Only `elements` takes part in equality and hashing; notes, molar mass and price are
/// metadata, so `Chemical::new("ClNa")` equals `Chemical::new("NaCl").with_price(3.0)`.
#[derive(Debug, Clone)]
pub struct Chemical {
    pub elements: ElementCounts,
    pub notes: String,
    /// g/mol; `None` means "use the value calculated from atomic masses"
    pub molar_mass: Option<f64>,
    /// price per mL or per g
    pub price: Option<f64>,
}

impl Chemical {
    pub fn new(formula: &str) -> Result<Self, MalformedFormula> {
        Ok(Chemical {
            elements: parse_formula(formula)?,
            notes: String::new(),
            molar_mass: None,
            price: None,
        })
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn with_molar_mass(mut self, molar_mass: f64) -> Self {
        self.molar_mass = Some(molar_mass);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// canonical formula, the lookup key of the component
    pub fn formula(&self) -> String {
        canonical_form(&self.elements)
    }

    pub fn calculated_molar_mass(&self) -> f64 {
        self.elements.molar_mass()
    }

    /// molar mass given by the user, or the calculated one
    pub fn effective_molar_mass(&self) -> f64 {
        self.molar_mass.unwrap_or_else(|| self.calculated_molar_mass())
    }
}

impl PartialEq for Chemical {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for Chemical {}

impl Hash for Chemical {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl fmt::Display for Chemical {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.elements)
    }
}
