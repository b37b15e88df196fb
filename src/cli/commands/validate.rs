//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a loaded file is a valid one.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Default FHIR Version: {}", config.application.default_version);
        println!("  Identifier System: {}", config.identifier.system);
        println!("  Currency: {}", config.general.currency);
        println!(
            "  Default Audit User Id: {}",
            config.general.default_audit_user_id
        );
        let statuses: Vec<String> = config
            .claim
            .status_displays()
            .iter()
            .map(|(code, display)| format!("{code}={display}"))
            .collect();
        println!("  Claim Statuses: {}", statuses.join(", "));
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(0)
    }
}
