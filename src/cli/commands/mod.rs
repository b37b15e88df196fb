//! CLI command implementations

pub mod convert;
pub mod init;
pub mod validate;

use crate::config::{load_config, FhirConfig};
use crate::domain::Result;
use std::path::Path;

/// Loads the configuration file, or the built-in defaults when it does not exist
pub(crate) fn load_config_or_default(config_path: &str) -> Result<FhirConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "Configuration file not found, using defaults");
        Ok(FhirConfig::default())
    }
}
