//! Validation error accumulator

use crate::domain::{FhirError, Result};

/// Collects field-level validation messages during one inbound conversion
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<String>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` when `failed` holds and returns `failed`
    ///
    /// Lets a builder skip the dependent extraction after a failed check:
    ///
    /// ```
    /// use imis_fhir::converters::ErrorCollector;
    ///
    /// let mut errors = ErrorCollector::new();
    /// let name: Option<&str> = None;
    /// if !errors.valid_condition(name.is_none(), "Missing patient `name` attribute") {
    ///     unreachable!();
    /// }
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn valid_condition(&mut self, failed: bool, message: impl Into<String>) -> bool {
        if failed {
            self.errors.push(message.into());
        }
        failed
    }

    /// Records a message unconditionally
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Fails with every collected message at once
    pub fn check(self, resource_type: &str) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            resource_type,
            error_count = self.errors.len(),
            "FHIR resource rejected"
        );
        Err(FhirError::RequestProcess(self.errors))
    }

    /// Returns `value` when nothing was collected
    pub fn finish<T>(self, resource_type: &str, value: T) -> Result<T> {
        self.check(resource_type)?;
        Ok(value)
    }
}
