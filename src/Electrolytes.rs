/// eng
/// Exact-set matching of a composition (component id -> amount) against recorded electrolytes.
/// A record matches only if it has the same components with the same amounts, no more and no fewer.
/// Several matching records mean the database holds duplicates; they are reported, never resolved.
///
///  # Examples
/// ```
/// use ElectroBase::Electrolytes::matcher::{MatchResult, find_match};
/// use ElectroBase::Storage::records::{CompositionRow, ElectrolyteAttributes, ElectrolyteRecord};
/// use std::collections::HashMap;
/// let record = ElectrolyteRecord {
///     id: 3,
///     attributes: ElectrolyteAttributes::default(),
///     rows: vec![
///         CompositionRow { component_id: 1, amount: 1.0 },
///         CompositionRow { component_id: 2, amount: 2.0 },
///     ],
/// };
/// let wanted = HashMap::from([(1, 1.0), (2, 2.0)]);
/// assert_eq!(find_match(&wanted, [&record]), MatchResult::Found(3));
/// let subset = HashMap::from([(1, 1.0)]);
/// assert_eq!(find_match(&subset, [&record]), MatchResult::NotFound);
/// ```
pub mod matcher;
/// eng
/// Registry of component types and electrolytes on top of a `CompositionStore`.
/// Registration of an electrolyte checks for an existing identical composition and inserts
/// the new record inside one critical section.
pub mod registry;
