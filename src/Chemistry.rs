/// Ordered whitelist of the 118 elements with their standard atomic weights.
/// The order of the whitelist is the order of elements in canonical formulas.
pub mod elements;
/// Module to parse chemical formulas into element counts and write them in canonical form
///
///  # Examples
/// ```
/// use ElectroBase::Chemistry::formula::{canonicalize, parse_formula};
/// let counts = parse_formula("Na(NO3)2").unwrap();
/// assert_eq!(counts.count_of("O"), 6);
/// assert_eq!(canonicalize("ClNa").unwrap(), "NaCl");
/// assert!(parse_formula("Xx2").is_err());
/// ```
pub mod formula;
/// Component type: formula identity plus notes, molar mass and price.
/// Two chemicals are equal when their formulas expand to the same element counts.
///
///  # Examples
/// ```
/// use ElectroBase::Chemistry::chemical::Chemical;
/// let salt = Chemical::new("ClNa").unwrap().with_price(2.0);
/// assert_eq!(salt, Chemical::new("NaCl").unwrap());
/// println!("{} {:.2} g/mol", salt, salt.calculated_molar_mass());
/// ```
pub mod chemical;
