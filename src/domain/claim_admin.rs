//! Claim administrator record

use super::health_facility::HealthFacility;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Facility staff member who enters claims, exposed as `Practitioner`
/// and `PractitionerRole`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimAdmin {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Claim administrator business code
    pub code: Option<String>,

    pub last_name: Option<String>,

    pub other_names: Option<String>,

    pub dob: Option<NaiveDate>,

    pub phone: Option<String>,

    pub email: Option<String>,

    /// Facility the administrator works for
    pub health_facility: Option<HealthFacility>,

    pub audit_user_id: Option<i64>,
}
