//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output
//! - optional JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use imis_fhir::logging::init_logging;
//! use imis_fhir::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a conversion
///
/// # Example
///
/// ```no_run
/// use imis_fhir::log_conversion_start;
///
/// log_conversion_start!("Patient", "to-fhir", "R4");
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($resource:expr, $direction:expr, $version:expr) => {
        tracing::info!(
            resource = %$resource,
            direction = %$direction,
            version = %$version,
            "Starting conversion"
        );
    };
}

/// Log a failed conversion with every collected issue
///
/// # Example
///
/// ```no_run
/// use imis_fhir::log_conversion_failure;
/// use imis_fhir::domain::FhirError;
///
/// let error = FhirError::RequestProcess(vec!["Missing the claim code".to_string()]);
/// log_conversion_failure!("Claim", &error);
/// ```
#[macro_export]
macro_rules! log_conversion_failure {
    ($resource:expr, $error:expr) => {
        tracing::error!(
            resource = %$resource,
            error = %$error,
            issue_count = $error.issues().len(),
            "Conversion failed"
        );
    };
}
