use crate::Chemistry::chemical::Chemical;
use crate::Chemistry::formula::MalformedFormula;
use crate::Electrolytes::matcher::MatchResult;
use crate::Electrolytes::registry::{ComponentRegistration, ElectrolyteRegistry, RegistryError};
use crate::Storage::records::{ElectrolyteAttributes, ElectrolyteId};
use crate::Storage::store::CompositionStore;
use crate::Utils::input_parsing::{
    InputError, composition_from_columns, parse_amount, parse_optional_amount,
};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Malformed(#[from] MalformedFormula),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Runs the menu on stdin/stdout until the user chooses 0 or stdin is closed.
pub fn run_interactive_menu<S: CompositionStore>(
    registry: &ElectrolyteRegistry<S>,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        show_main_menu()?;
        let Some(choice) = read_line(&mut input)? else {
            println!("Goodbye!");
            return Ok(());
        };
        let outcome = match choice.trim() {
            "1" => add_component(registry, &mut input),
            "2" => add_electrolyte(registry, &mut input),
            "3" => find_electrolyte(registry, &mut input),
            "4" => show_components(registry, &mut input),
            "5" => remove_component(registry, &mut input),
            "6" => print_tables(registry),
            "0" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        // a failed action is reported and the menu goes on; only terminal failures stop it
        match outcome {
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => println!("\x1b[31mError: {}\x1b[0m", e),
            Ok(()) => {}
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Red (\x1b[31m) - errors
*/
fn show_main_menu() -> io::Result<()> {
    println!(
        "\x1b[34m\n Welcome to ElectroBase: electrolyte compositions and properties database \n \x1b[0m"
    );
    println!("\x1b[33m1. Add component\x1b[0m");
    println!("\x1b[33m2. Add electrolyte\x1b[0m");
    println!("\x1b[33m3. Find electrolyte by composition\x1b[0m");
    println!("\x1b[33m4. Show components of electrolyte\x1b[0m");
    println!("\x1b[33m5. Remove component\x1b[0m");
    println!("\x1b[33m6. Print tables\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ")
}

fn prompt(text: &str) -> io::Result<()> {
    print!("\x1b[36m{}\x1b[0m", text);
    io::stdout().flush()
}

/// `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask<R: BufRead>(input: &mut R, text: &str) -> Result<String, CliError> {
    prompt(text)?;
    read_line(input)?.ok_or_else(|| {
        CliError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        ))
    })
}

fn ask_amount<R: BufRead>(input: &mut R, text: &str) -> Result<f64, CliError> {
    Ok(parse_amount(&ask(input, text)?)?)
}

fn ask_optional<R: BufRead>(input: &mut R, text: &str) -> Result<Option<f64>, CliError> {
    Ok(parse_optional_amount(&ask(input, text)?)?)
}

fn ask_id<R: BufRead>(input: &mut R, text: &str) -> Result<Option<ElectrolyteId>, CliError> {
    let answer = ask(input, text)?;
    match answer.trim().parse::<ElectrolyteId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("'{}' is not an electrolyte id", answer.trim());
            Ok(None)
        }
    }
}

fn add_component<S: CompositionStore, R: BufRead>(
    registry: &ElectrolyteRegistry<S>,
    input: &mut R,
) -> Result<(), CliError> {
    let formula = ask(input, "Formula: ")?;
    let mut chemical = Chemical::new(formula.trim())?;
    chemical.notes = ask(input, "Notes: ")?.trim().to_string();
    chemical.molar_mass = ask_optional(input, "Molar mass, g/mol (empty = calculate): ")?;
    chemical.price = ask_optional(input, "Price (empty = 0): ")?;
    match registry.register_component(&chemical)? {
        ComponentRegistration::Registered(id) => {
            println!("Component {} added with id {}", chemical, id)
        }
        ComponentRegistration::AlreadyRegistered(id) => {
            println!("Component {} is already registered with id {}", chemical, id)
        }
    }
    Ok(())
}

fn add_electrolyte<S: CompositionStore, R: BufRead>(
    registry: &ElectrolyteRegistry<S>,
    input: &mut R,
) -> Result<(), CliError> {
    let formulas = ask(input, "Component formulas (space separated): ")?;
    let amounts = ask(input, "Amounts, same order: ")?;
    let composition = composition_from_columns(&formulas, &amounts)?;
    let mut attributes = ElectrolyteAttributes::new(
        ask_amount(input, "Conductivity: ")?,
        ask_amount(input, "Conductivity uncertainty bound: ")?,
        ask_amount(input, "Concentration uncertainty bound: ")?,
    );
    println!("Optional properties, leave empty if not measured");
    attributes.density = ask_optional(input, "Density: ")?;
    attributes.temperature = ask_optional(input, "Temperature: ")?;
    attributes.viscosity = ask_optional(input, "Viscosity: ")?;
    attributes.v_window_low_bound = ask_optional(input, "Voltage window low bound: ")?;
    attributes.v_window_high_bound = ask_optional(input, "Voltage window high bound: ")?;
    attributes.surface_tension = ask_optional(input, "Surface tension: ")?;
    let id = registry.register_electrolyte(&composition, attributes)?;
    println!("Electrolyte added with id {}", id);
    Ok(())
}

fn find_electrolyte<S: CompositionStore, R: BufRead>(
    registry: &ElectrolyteRegistry<S>,
    input: &mut R,
) -> Result<(), CliError> {
    let formulas = ask(input, "Component formulas (space separated): ")?;
    let amounts = ask(input, "Amounts, same order: ")?;
    let composition = composition_from_columns(&formulas, &amounts)?;
    match registry.find_electrolyte_by_composition(&composition)? {
        MatchResult::Found(id) => println!("Electrolyte found, id {}", id),
        MatchResult::NotFound => println!("No electrolyte with this composition"),
        MatchResult::Ambiguous(ids) => {
            println!("\x1b[31mSeveral electrolytes share this composition: {:?}\x1b[0m", ids)
        }
    }
    Ok(())
}

fn show_components<S: CompositionStore, R: BufRead>(
    registry: &ElectrolyteRegistry<S>,
    input: &mut R,
) -> Result<(), CliError> {
    let Some(id) = ask_id(input, "Electrolyte id: ")? else {
        return Ok(());
    };
    match registry.get_components_by_id(id)? {
        Some(components) => {
            for (formula, amount) in components {
                println!("{:<20} {}", formula, amount);
            }
        }
        None => println!("No electrolyte with id {}", id),
    }
    Ok(())
}

fn remove_component<S: CompositionStore, R: BufRead>(
    registry: &ElectrolyteRegistry<S>,
    input: &mut R,
) -> Result<(), CliError> {
    let formula = ask(input, "Formula: ")?;
    match registry.remove_component(formula.trim())? {
        Some(record) => println!("Component {} (id {}) removed", record.formula, record.id),
        None => println!("No component with formula {}", formula.trim()),
    }
    Ok(())
}

fn print_tables<S: CompositionStore>(registry: &ElectrolyteRegistry<S>) -> Result<(), CliError> {
    registry.print_components_table()?;
    registry.print_electrolytes_table()?;
    Ok(())
}
