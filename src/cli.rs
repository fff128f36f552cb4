/// Interactive terminal menu over an `ElectrolyteRegistry`
pub mod cli_main;
