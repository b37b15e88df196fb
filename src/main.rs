// IMIS FHIR - FHIR resource mapping for the IMIS insurance platform
// Copyright (c) 2025 IMIS FHIR Contributors
// Licensed under the MIT License

use clap::Parser;
use imis_fhir::cli::{Cli, Commands};
use imis_fhir::config::{load_config, LoggingConfig};
use imis_fhir::logging::init_logging;
use std::path::Path;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the configuration when it loads; errors in it
    // are reported by the command itself
    let file_config = Path::new(&cli.config)
        .exists()
        .then(|| load_config(&cli.config).ok())
        .flatten();
    let logging_config = file_config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.map(|config| config.application.log_level))
        .unwrap_or_else(|| "warn".to_string());
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "IMIS FHIR");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(exit_code);
}

fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ToFhir(args) => args.execute(&cli.config),
        Commands::ToImis(args) => args.execute(&cli.config),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
