/// Terminal and optional file logging for the binary
pub mod logger;
/// Parsing of the columns typed into the terminal menu
///
///  # Examples
/// ```
/// use ElectroBase::Utils::input_parsing::composition_from_columns;
/// let composition = composition_from_columns("LiPF6 C3H4O3", "1.0 10").unwrap();
/// assert_eq!(composition["C3H4O3"], 10.0);
/// ```
pub mod input_parsing;
