// IMIS FHIR - FHIR resource mapping for the IMIS insurance platform
// Copyright (c) 2025 IMIS FHIR Contributors
// Licensed under the MIT License

//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// IMIS FHIR - convert IMIS records to and from FHIR STU3/R4 resources
#[derive(Parser, Debug)]
#[command(name = "imis-fhir")]
#[command(version, about, long_about = None)]
#[command(author = "IMIS FHIR Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "imis-fhir.toml", env = "IMIS_FHIR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "IMIS_FHIR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a domain record to a FHIR resource
    ToFhir(commands::convert::ToFhirArgs),

    /// Convert a FHIR resource to a domain record
    ToImis(commands::convert::ToImisArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
