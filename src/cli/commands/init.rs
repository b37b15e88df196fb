//! `init`: writes a starter `imis-fhir.toml`
//!
//! The file holds every key at its default value under a short header.

use crate::config::FhirConfig;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::path::Path;

const CONFIG_HEADER: &str = "# IMIS FHIR configuration\n\
# Every key is optional; omitted keys take the values shown here.\n\
# Values may reference environment variables as ${VAR_NAME}.\n\n";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to create
    #[arg(short, long, default_value = "imis-fhir.toml")]
    pub output: String,

    /// Replace the file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Returns 2 when the file exists and `--force` was not given
    ///
    /// # Errors
    ///
    /// Rendering or writing the file fails.
    pub fn execute(&self) -> anyhow::Result<i32> {
        let target = Path::new(&self.output);
        if target.exists() && !self.force {
            tracing::warn!(output = %self.output, "Refusing to overwrite configuration");
            println!("❌ {} already exists (use --force to replace it)", self.output);
            return Ok(2);
        }

        let rendered = default_config_text().map_err(anyhow::Error::msg)?;
        fs::write(target, rendered)
            .with_context(|| format!("Failed to write configuration to {}", self.output))?;
        tracing::info!(output = %self.output, overwritten = self.force, "Configuration file written");

        println!("✅ Wrote {}", self.output);
        println!("   Check it with: imis-fhir --config {} validate-config", self.output);
        Ok(0)
    }
}

/// Header plus the default configuration as TOML
fn default_config_text() -> Result<String, String> {
    Ok(format!("{CONFIG_HEADER}{}", FhirConfig::default().to_toml_string()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_loads() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("imis-fhir.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().unwrap(), 0);
        let config = load_config(&output).unwrap();
        assert_eq!(config.identifier.facility_id_type, "FI");
    }

    #[test]
    fn test_existing_file_needs_force() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("imis-fhir.toml");
        fs::write(&output, "").unwrap();
        let mut args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };

        assert_eq!(args.execute().unwrap(), 2);
        args.force = true;
        assert_eq!(args.execute().unwrap(), 0);
    }

    #[test]
    fn test_default_config_text() {
        let config = default_config_text().unwrap();
        assert!(config.starts_with("# IMIS FHIR configuration"));
        assert!(config.contains("[identifier]"));
        assert!(config.contains("[claim]"));
    }
}
