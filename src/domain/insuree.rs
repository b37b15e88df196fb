//! Insuree domain record
//!
//! The persistence layer owns insurees; converters only read and write the
//! fields below.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An insured person, exposed as a FHIR `Patient`
///
/// # Examples
///
/// ```
/// use imis_fhir::domain::Insuree;
///
/// let insuree = Insuree {
///     last_name: Some("Doe".to_string()),
///     other_names: Some("Jane".to_string()),
///     chf_id: Some("CHF123".to_string()),
///     ..Default::default()
/// };
/// assert!(!insuree.head);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insuree {
    /// Database id
    pub id: Option<i64>,

    /// Stable external id
    pub uuid: Option<Uuid>,

    /// Insurance number (CHF / social-benefit id)
    pub chf_id: Option<String>,

    pub last_name: Option<String>,

    pub other_names: Option<String>,

    /// Date of birth
    pub dob: Option<NaiveDate>,

    /// Single-letter gender code (`M`, `F`, `O`)
    pub gender: Option<String>,

    /// Single-letter marital status (`M`, `S`, `D`, `W`, `N`)
    pub marital: Option<String>,

    pub passport: Option<String>,

    pub phone: Option<String>,

    pub email: Option<String>,

    pub current_address: Option<String>,

    pub geolocation: Option<String>,

    /// Head of family flag
    pub head: bool,

    pub card_issued: bool,

    pub validity_from: Option<NaiveDateTime>,

    pub audit_user_id: Option<i64>,
}

impl Insuree {
    /// Full display name, family name first
    pub fn display_name(&self) -> Option<String> {
        match (&self.last_name, &self.other_names) {
            (Some(last), Some(other)) => Some(format!("{last} {other}")),
            (Some(last), None) => Some(last.clone()),
            (None, Some(other)) => Some(other.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insuree_deserialize_partial() {
        let insuree: Insuree = serde_json::from_str(
            r#"{"last_name": "Doe", "dob": "1990-03-24", "gender": "F"}"#,
        )
        .unwrap();
        assert_eq!(insuree.last_name.as_deref(), Some("Doe"));
        assert_eq!(insuree.dob, NaiveDate::from_ymd_opt(1990, 3, 24));
        assert!(insuree.id.is_none());
        assert!(!insuree.card_issued);
    }

    #[test]
    fn test_display_name() {
        let insuree = Insuree {
            last_name: Some("Doe".to_string()),
            other_names: Some("Jane".to_string()),
            ..Default::default()
        };
        assert_eq!(insuree.display_name().as_deref(), Some("Doe Jane"));
        assert!(Insuree::default().display_name().is_none());
    }
}
