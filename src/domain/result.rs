//! Crate-wide result alias

use super::errors::FhirError;

/// Result of every model, converter and configuration operation
///
/// ```
/// use imis_fhir::domain::{FhirError, Result};
///
/// fn require_chf_id(chf_id: Option<&str>) -> Result<&str> {
///     chf_id.ok_or_else(|| FhirError::RequestProcess(vec!["Missing insuree CHF id".to_string()]))
/// }
///
/// assert_eq!(require_chf_id(Some("CHF123")).unwrap(), "CHF123");
/// assert!(require_chf_id(None).is_err());
/// ```
pub type Result<T> = std::result::Result<T, FhirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_errors_propagate() -> Result<()> {
        fn parse(text: &str) -> Result<serde_json::Value> {
            Ok(serde_json::from_str(text)?)
        }

        assert_eq!(parse("{\"resourceType\": \"Patient\"}")?["resourceType"], "Patient");
        assert!(matches!(parse("{"), Err(FhirError::Serialization(_))));
        Ok(())
    }
}
