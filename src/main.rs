use ElectroBase::Electrolytes::registry::ElectrolyteRegistry;
use ElectroBase::Storage::store::create_store;
use ElectroBase::Utils::logger::init_logging;
use ElectroBase::cli::cli_main::run_interactive_menu;
use ElectroBase::settings::SettingsManager;
use log::info;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let settings = SettingsManager::new();
    let config = settings.config();
    if let Err(e) = init_logging(config) {
        eprintln!("logging disabled: {}", e);
    }
    let store = match create_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("cannot open the database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "using {} store (database file {})",
        config.store, config.database_file
    );
    let registry = ElectrolyteRegistry::new(store);
    match run_interactive_menu(&registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
