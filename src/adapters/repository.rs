//! Persistence lookup trait
//!
//! Converters never talk to a database directly. Whenever a FHIR reference or
//! code has to be turned back into a domain record they ask an
//! [`ImisRepository`], so the persistence layer stays opaque.

use crate::domain::{
    AdministrativeLocation, Claim, ClaimAdmin, DiagnosisCode, Feedback, HealthFacility, Insuree,
    MedicalItem, Result, Service,
};
use crate::model::FhirVersion;
use std::fmt;
use uuid::Uuid;

/// How a record is addressed by a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Database id
    Id(i64),
    /// External uuid
    Uuid(Uuid),
    /// Business code (claim code, facility code, CHF id, service or item code)
    Code(String),
}

impl RecordKey {
    /// Interprets a reference id the way `version` writes it
    ///
    /// STU3 references carry the database id and R4 references the uuid.
    /// Anything that does not parse as such is treated as a business code.
    pub fn from_reference_id(version: FhirVersion, raw: &str) -> Self {
        let raw = raw.trim();
        match version {
            FhirVersion::Stu3 => raw
                .parse::<i64>()
                .map(RecordKey::Id)
                .unwrap_or_else(|_| RecordKey::Code(raw.to_string())),
            FhirVersion::R4 => Uuid::parse_str(raw)
                .map(RecordKey::Uuid)
                .unwrap_or_else(|_| RecordKey::Code(raw.to_string())),
        }
    }

    /// Whether a record with these identities matches the key
    pub fn matches(&self, id: Option<i64>, uuid: Option<Uuid>, code: Option<&str>) -> bool {
        match self {
            RecordKey::Id(key) => id == Some(*key),
            RecordKey::Uuid(key) => uuid == Some(*key),
            RecordKey::Code(key) => code == Some(key.as_str()),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => write!(f, "id {id}"),
            RecordKey::Uuid(uuid) => write!(f, "uuid {uuid}"),
            RecordKey::Code(code) => write!(f, "code {code}"),
        }
    }
}

/// Read access to the domain records converters need to resolve
///
/// Implementations return `Ok(None)` for a missing record and reserve `Err`
/// for failures of the store itself.
pub trait ImisRepository: Send + Sync {
    fn find_insuree(&self, key: &RecordKey) -> Result<Option<Insuree>>;

    fn find_health_facility(&self, key: &RecordKey) -> Result<Option<HealthFacility>>;

    fn find_location(&self, key: &RecordKey) -> Result<Option<AdministrativeLocation>>;

    fn find_claim_admin(&self, key: &RecordKey) -> Result<Option<ClaimAdmin>>;

    fn find_claim(&self, key: &RecordKey) -> Result<Option<Claim>>;

    fn find_feedback(&self, key: &RecordKey) -> Result<Option<Feedback>>;

    fn find_service(&self, key: &RecordKey) -> Result<Option<Service>>;

    fn find_medical_item(&self, key: &RecordKey) -> Result<Option<MedicalItem>>;

    /// Looks up an ICD code by its code text
    fn find_diagnosis(&self, code: &str) -> Result<Option<DiagnosisCode>>;
}
