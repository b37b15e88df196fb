//! Resource reference identifiers
//!
//! Cross-entity links are written as `"<ResourceType>/<id>"`. [`ResourceRef`]
//! is the parsed form of such a string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed `"<ResourceType>/<id>"` reference string
///
/// # Examples
///
/// ```
/// use imis_fhir::domain::ids::ResourceRef;
/// use std::str::FromStr;
///
/// let reference = ResourceRef::from_str("Patient/42").unwrap();
/// assert_eq!(reference.resource_type(), "Patient");
/// assert_eq!(reference.id(), "42");
/// assert_eq!(reference.to_string(), "Patient/42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    resource_type: String,
    id: String,
}

impl ResourceRef {
    /// Creates a reference from its parts
    ///
    /// # Returns
    ///
    /// Returns `Err` if either part is empty or the type contains a `/`
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Result<Self, String> {
        let resource_type = resource_type.into();
        let id = id.into();
        if resource_type.trim().is_empty() {
            return Err("Reference resource type cannot be empty".to_string());
        }
        if resource_type.contains('/') {
            return Err(format!("Invalid reference resource type: {resource_type}"));
        }
        if id.trim().is_empty() {
            return Err("Reference id cannot be empty".to_string());
        }
        Ok(Self { resource_type, id })
    }

    /// Parses a `"Type/id"` string
    ///
    /// Only the last two path segments are used, so absolute references such as
    /// `"http://server/fhir/Patient/42"` resolve to `Patient/42`.
    pub fn parse(reference: &str) -> Result<Self, String> {
        let mut segments = reference.trim().rsplit('/');
        let id = segments.next().unwrap_or_default();
        let resource_type = segments
            .next()
            .ok_or_else(|| format!("Invalid reference format: {reference}"))?;
        Self::new(resource_type, id)
    }

    /// Returns the resource type part
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the id or business code part
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

impl FromStr for ResourceRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_parse() {
        let reference = ResourceRef::from_str("Location/17").unwrap();
        assert_eq!(reference.resource_type(), "Location");
        assert_eq!(reference.id(), "17");
    }

    #[test]
    fn test_reference_absolute_url() {
        let reference = ResourceRef::parse("http://example.org/fhir/Practitioner/3").unwrap();
        assert_eq!(reference.to_string(), "Practitioner/3");
    }

    #[test]
    fn test_reference_without_type_fails() {
        assert!(ResourceRef::parse("17").is_err());
        assert!(ResourceRef::parse("Patient/").is_err());
        assert!(ResourceRef::parse("").is_err());
    }

    #[test]
    fn test_reference_new_rejects_slash_in_type() {
        assert!(ResourceRef::new("Patient/1", "2").is_err());
    }
}
