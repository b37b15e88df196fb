//! Health facility and administrative location records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Facility level code for hospitals
pub const HF_LEVEL_HOSPITAL: &str = "H";
/// Facility level code for dispensaries
pub const HF_LEVEL_DISPENSARY: &str = "D";
/// Facility level code for health centers
pub const HF_LEVEL_HEALTH_CENTER: &str = "C";

/// Administrative location type codes
pub const LOCATION_TYPE_REGION: &str = "R";
pub const LOCATION_TYPE_DISTRICT: &str = "D";
pub const LOCATION_TYPE_WARD: &str = "W";
pub const LOCATION_TYPE_VILLAGE: &str = "V";

/// A health facility, exposed as a FHIR `Location`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthFacility {
    /// Database id
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Facility business code
    pub code: Option<String>,

    pub name: Option<String>,

    /// Facility level (`H`, `D`, `C`)
    pub level: Option<String>,

    pub address: Option<String>,

    pub phone: Option<String>,

    pub fax: Option<String>,

    pub email: Option<String>,

    pub offline: bool,

    /// Care type (in-patient, out-patient, both)
    pub care_type: Option<String>,

    pub validity_from: Option<NaiveDateTime>,

    pub audit_user_id: Option<i64>,

    /// Administrative area the facility belongs to
    pub location: Option<AdministrativeLocation>,
}

/// Region, district, ward or village in the administrative hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdministrativeLocation {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    pub code: Option<String>,

    pub name: Option<String>,

    /// Location type (`R`, `D`, `W`, `V`)
    pub location_type: Option<String>,

    /// Id of the enclosing location
    pub parent_id: Option<String>,
}
