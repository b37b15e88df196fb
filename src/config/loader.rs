//! Reads `imis-fhir.toml`
//!
//! Loading runs in four steps: `${VAR}` placeholders are expanded from the
//! environment, the TOML is parsed into [`FhirConfig`], `IMIS_FHIR_*`
//! variables override single keys, and the result is validated.

use super::schema::FhirConfig;
use crate::domain::{FhirError, Result};
use regex::{Captures, Regex};
use std::io::ErrorKind;
use std::path::Path;

/// Placeholder syntax, e.g. `${IMIS_CURRENCY}`
const PLACEHOLDER_PATTERN: &str = r"\$\{([A-Z_][A-Z0-9_]*)\}";

type Override = fn(&mut FhirConfig, String) -> Result<()>;

/// `IMIS_FHIR_<SECTION>_<KEY>` variables and the key each one replaces
const ENV_OVERRIDES: &[(&str, Override)] = &[
    ("IMIS_FHIR_APPLICATION_LOG_LEVEL", |config, value| {
        config.application.log_level = value;
        Ok(())
    }),
    ("IMIS_FHIR_APPLICATION_DEFAULT_VERSION", |config, value| {
        config.application.default_version = value;
        Ok(())
    }),
    ("IMIS_FHIR_GENERAL_DEFAULT_AUDIT_USER_ID", |config, value| {
        config.general.default_audit_user_id = value.trim().parse().map_err(|_| {
            FhirError::Configuration(format!(
                "IMIS_FHIR_GENERAL_DEFAULT_AUDIT_USER_ID must be an integer, got '{value}'"
            ))
        })?;
        Ok(())
    }),
    ("IMIS_FHIR_GENERAL_CURRENCY", |config, value| {
        config.general.currency = value;
        Ok(())
    }),
    ("IMIS_FHIR_IDENTIFIER_SYSTEM", |config, value| {
        config.identifier.system = value;
        Ok(())
    }),
    ("IMIS_FHIR_LOGGING_LOCAL_ENABLED", |config, value| {
        config.logging.local_enabled = matches!(value.trim(), "true" | "1");
        Ok(())
    }),
    ("IMIS_FHIR_LOGGING_LOCAL_PATH", |config, value| {
        config.logging.local_path = value;
        Ok(())
    }),
];

/// Loads and validates the configuration file at `path`
///
/// # Errors
///
/// Every failure is a [`FhirError::Configuration`]: a missing or unreadable
/// file, unset placeholder variables, malformed TOML, a malformed override,
/// or a rejected value.
///
/// ```no_run
/// use imis_fhir::config::load_config;
///
/// let config = load_config("imis-fhir.toml")?;
/// println!("default FHIR version: {}", config.application.default_version);
/// # Ok::<(), imis_fhir::domain::FhirError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FhirConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        FhirError::Configuration(match e.kind() {
            ErrorKind::NotFound => format!("Configuration file not found: {}", path.display()),
            _ => format!("Failed to read configuration file {}: {e}", path.display()),
        })
    })?;
    tracing::debug!(path = %path.display(), "Reading configuration");
    load_config_from_str(&contents)
}

/// Same as [`load_config`], from TOML text
pub fn load_config_from_str(contents: &str) -> Result<FhirConfig> {
    let expanded = expand_placeholders(contents)?;
    let mut config: FhirConfig = toml::from_str(&expanded)
        .map_err(|e| FhirError::Configuration(format!("Failed to parse TOML: {e}")))?;

    for (name, apply) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(name) {
            tracing::debug!(variable = name, "Applying environment override");
            apply(&mut config, value)?;
        }
    }

    config
        .validate()
        .map_err(|e| FhirError::Configuration(format!("Configuration validation failed: {e}")))?;

    tracing::debug!(
        version = %config.application.default_version,
        local_logging = config.logging.local_enabled,
        "Configuration loaded"
    );
    Ok(config)
}

/// Replaces `${VAR}` with the variable's value outside `#` comment lines
///
/// Unset variables are reported together, each named once.
fn expand_placeholders(input: &str) -> Result<String> {
    let pattern = Regex::new(PLACEHOLDER_PATTERN)
        .map_err(|e| FhirError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut unset: Vec<String> = Vec::new();

    let expanded: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            pattern
                .replace_all(line, |caps: &Captures<'_>| {
                    let name = &caps[1];
                    std::env::var(name).unwrap_or_else(|_| {
                        if !unset.iter().any(|known| known == name) {
                            unset.push(name.to_string());
                        }
                        String::new()
                    })
                })
                .into_owned()
        })
        .collect();

    if !unset.is_empty() {
        return Err(FhirError::Configuration(format!(
            "Missing required environment variables: {}",
            unset.join(", ")
        )));
    }
    let mut text = expanded.join("\n");
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_placeholder_expanded() {
        std::env::set_var("IMIS_FHIR_LOADER_TEST_VAR", "TZS");
        let expanded = expand_placeholders("currency = \"${IMIS_FHIR_LOADER_TEST_VAR}\"").unwrap();
        assert_eq!(expanded, "currency = \"TZS\"\n");
        std::env::remove_var("IMIS_FHIR_LOADER_TEST_VAR");
    }

    #[test]
    fn test_unset_placeholders_reported_together() {
        std::env::remove_var("IMIS_FHIR_LOADER_MISSING_A");
        std::env::remove_var("IMIS_FHIR_LOADER_MISSING_B");
        let input = "a = \"${IMIS_FHIR_LOADER_MISSING_A}\"\n\
                     b = \"${IMIS_FHIR_LOADER_MISSING_B}${IMIS_FHIR_LOADER_MISSING_A}\"";
        let message = expand_placeholders(input).unwrap_err().to_string();
        assert!(message.ends_with("IMIS_FHIR_LOADER_MISSING_A, IMIS_FHIR_LOADER_MISSING_B"));
    }

    #[test]
    fn test_comment_lines_untouched() {
        let input = "  # currency = \"${IMIS_FHIR_LOADER_UNSET_IN_COMMENT}\"";
        assert_eq!(expand_placeholders(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("nonexistent-imis-fhir.toml").unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[application]\ndefault_version = \"r4\"\n\n[identifier]\nchfid_type_code = \"CHF\"\n\n\
             [logging]\nlocal_rotation = \"hourly\""
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.application.default_version, "r4");
        assert_eq!(config.identifier.chfid_type_code, "CHF");
        assert_eq!(config.identifier.passport_type_code, "PPN");
        assert_eq!(config.logging.local_rotation, "hourly");
    }

    #[test]
    fn test_rejected_value() {
        let err = load_config_from_str("[logging]\nlocal_rotation = \"weekly\"\n").unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
