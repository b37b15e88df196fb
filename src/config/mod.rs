//! Configuration management
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation for the mapping layer.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every key, so an empty file is valid
//! - `IMIS_FHIR_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! The loaded [`FhirConfig`] is passed by reference to every conversion;
//! there is no global configuration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use imis_fhir::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("imis-fhir.toml")?;
//! println!("Identifier system: {}", config.identifier.system);
//! println!("Currency: {}", config.general.currency);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and default FHIR version
//! - [`GeneralConfig`] - Audit defaults, date formats, gender codes, currency
//! - [`IdentifierConfig`] - Identifier type system and codes
//! - [`LocationConfig`] - Facility level and physical type codes
//! - [`MaritalConfig`] - Marital status codes
//! - [`IssueTypeConfig`] - OperationOutcome issue codes
//! - [`ClaimConfig`] - Claim categories and status displays
//! - [`MedicalConfig`] - Usage context system and unit price extension of the price catalog
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! default_version = "stu3"
//!
//! [general]
//! currency = "${IMIS_CURRENCY}"
//!
//! [identifier]
//! system = "https://hl7.org/fhir/valueset-identifier-type.html"
//! chfid_type_code = "SB"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, ClaimConfig, FhirConfig, GenderCodes, GeneralConfig, IdentifierConfig,
    IssueTypeConfig, LocationConfig, LoggingConfig, MaritalConfig, MedicalConfig,
};
