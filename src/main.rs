//! Library Vault - Entry Point
//!
//! Console library manager: log in, register users and books, list them.

use log::{error, info};
use std::io;
use std::process::ExitCode;

use library_vault::utils::logging::setup_logging;
use library_vault::{AppConfig, Gateway, Shell};

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_logging(&config.logging);
    info!("Launching library shell with {:?}", config.database);

    let mut gateway = match Gateway::from_config(&config.database) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Cannot build gateway: {}", e);
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = gateway.connect() {
        eprintln!("❌ Could not connect to the database: {}", e);
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let result = Shell::new(&mut gateway, stdin.lock(), io::stdout()).run();
    gateway.close();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Console failure: {}", e);
            ExitCode::FAILURE
        }
    }
}
