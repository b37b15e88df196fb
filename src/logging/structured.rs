//! Subscriber installation
//!
//! Console output is always on. When `logging.local_enabled` is set, a JSON
//! file layer writes to `<local_path>/imis-fhir.log` with daily or hourly
//! rotation.

use crate::config::LoggingConfig;
use crate::domain::{FhirError, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_NAME: &str = "imis-fhir.log";

const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer flushing until dropped
///
/// Hold it in `main` for the lifetime of the process.
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set. Console output goes to
/// stderr so converted documents on stdout stay clean.
///
/// # Errors
///
/// [`FhirError::Configuration`] for an unknown level, an unwritable log
/// directory, or a subscriber that is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = crate_filter(parse_log_level(level)?);

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed()];

    let file_writer = if config.local_enabled {
        let (writer, guard) = rolling_writer(config)?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        );
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| FhirError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        level,
        file_logging = config.local_enabled,
        log_dir = %config.local_path,
        "Logging initialized"
    );
    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

/// Case-insensitive level name
pub fn parse_log_level(name: &str) -> Result<Level> {
    LEVELS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            FhirError::Configuration(format!(
                "Invalid log level: {name}. Must be one of: trace, debug, info, warn, error"
            ))
        })
}

fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("imis_fhir={level}")))
}

fn rolling_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        FhirError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;
    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    Ok(tracing_appender::non_blocking(appender))
}

/// Anything but `hourly` rotates daily; the config validator rejects other values
fn rotation(name: &str) -> Rotation {
    if name == "hourly" {
        Rotation::HOURLY
    } else {
        Rotation::DAILY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO)]
    #[test_case("Warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_level_names(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("verbose")]
    #[test_case("")]
    #[test_case("3")]
    fn test_unknown_level(input: &str) {
        assert!(matches!(
            parse_log_level(input),
            Err(FhirError::Configuration(_))
        ));
    }

    #[test]
    fn test_rotation() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("daily"), Rotation::DAILY);
    }
}
