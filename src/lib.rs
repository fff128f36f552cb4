#[allow(non_snake_case)]
pub mod Chemistry;
#[allow(non_snake_case)]
pub mod Electrolytes;
#[allow(non_snake_case)]
pub mod Storage;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod settings;

pub use Chemistry::formula::{canonical_form, parse_formula};
pub use Electrolytes::registry::ElectrolyteRegistry;
