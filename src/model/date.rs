//! FHIR date literal
//!
//! Dates are kept as their raw text so no precision or timezone information is
//! lost between decoding and encoding. Validation uses the FHIR `dateTime`
//! pattern with an optional timezone.

use crate::domain::{FhirError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const FHIR_DATE_PATTERN: &str = r"^-?[0-9]{4}(-(0[1-9]|1[0-2])(-(0[0-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))?)?)?)?$";

fn date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(FHIR_DATE_PATTERN).ok())
        .as_ref()
}

/// Validated FHIR `date` / `dateTime` string
///
/// # Examples
///
/// ```
/// use imis_fhir::model::FhirDate;
///
/// assert!(FhirDate::new("1990-03-24").is_ok());
/// assert!(FhirDate::new("2024-01-05T10:30:00+02:00").is_ok());
/// assert!(FhirDate::new("24/03/1990").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FhirDate(String);

impl FhirDate {
    /// Validates and wraps a date literal
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Property`] when the text does not match the FHIR
    /// date pattern.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(FhirError::Property(format!(
                "Value \"{value}\" is not a valid value of FHIRDate"
            )))
        }
    }

    /// Whether `value` matches the FHIR date pattern
    pub fn is_valid(value: &str) -> bool {
        date_pattern().is_some_and(|pattern| pattern.is_match(value))
    }

    /// Formats a calendar date with `format`
    pub fn from_date(date: NaiveDate, format: &str) -> Result<Self> {
        Self::new(date.format(format).to_string())
    }

    /// Formats a timestamp with `format`
    pub fn from_datetime(datetime: NaiveDateTime, format: &str) -> Result<Self> {
        Self::new(datetime.format(format).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FhirDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FhirDate {
    type Error = FhirError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FhirDate> for String {
    fn from(date: FhirDate) -> Self {
        date.0
    }
}
