//! In-memory repository
//!
//! Backs the CLI and the tests. Records are loaded from a JSON fixtures file
//! shaped like [`RepositoryFixtures`]:
//!
//! ```json
//! {
//!   "insurees": [{"id": 1, "chf_id": "CHF123", "last_name": "Doe"}],
//!   "diagnoses": [{"id": 7, "code": "A01", "name": "Typhoid"}]
//! }
//! ```

use super::repository::{ImisRepository, RecordKey};
use crate::domain::{
    AdministrativeLocation, Claim, ClaimAdmin, DiagnosisCode, Feedback, FhirError, HealthFacility,
    Insuree, MedicalItem, Result, Service,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Records held by an [`InMemoryRepository`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryFixtures {
    pub insurees: Vec<Insuree>,
    pub health_facilities: Vec<HealthFacility>,
    pub locations: Vec<AdministrativeLocation>,
    pub claim_admins: Vec<ClaimAdmin>,
    pub claims: Vec<Claim>,
    pub feedbacks: Vec<Feedback>,
    pub diagnoses: Vec<DiagnosisCode>,
    pub services: Vec<Service>,
    pub medical_items: Vec<MedicalItem>,
}

/// Vector-backed [`ImisRepository`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    fixtures: RepositoryFixtures,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixtures(fixtures: RepositoryFixtures) -> Self {
        Self { fixtures }
    }

    /// Loads fixtures from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Io`] if the file cannot be read and
    /// [`FhirError::Serialization`] if it is not valid fixtures JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            FhirError::Io(format!("Failed to read fixtures {}: {}", path.display(), e))
        })?;
        let fixtures: RepositoryFixtures = serde_json::from_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            insurees = fixtures.insurees.len(),
            claims = fixtures.claims.len(),
            "Loaded repository fixtures"
        );
        Ok(Self::from_fixtures(fixtures))
    }

    pub fn with_insuree(mut self, insuree: Insuree) -> Self {
        self.fixtures.insurees.push(insuree);
        self
    }

    pub fn with_health_facility(mut self, facility: HealthFacility) -> Self {
        self.fixtures.health_facilities.push(facility);
        self
    }

    pub fn with_location(mut self, location: AdministrativeLocation) -> Self {
        self.fixtures.locations.push(location);
        self
    }

    pub fn with_claim_admin(mut self, admin: ClaimAdmin) -> Self {
        self.fixtures.claim_admins.push(admin);
        self
    }

    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.fixtures.claims.push(claim);
        self
    }

    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.fixtures.feedbacks.push(feedback);
        self
    }

    pub fn with_diagnosis(mut self, diagnosis: DiagnosisCode) -> Self {
        self.fixtures.diagnoses.push(diagnosis);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.fixtures.services.push(service);
        self
    }

    pub fn with_medical_item(mut self, item: MedicalItem) -> Self {
        self.fixtures.medical_items.push(item);
        self
    }

    pub fn fixtures(&self) -> &RepositoryFixtures {
        &self.fixtures
    }
}

impl ImisRepository for InMemoryRepository {
    fn find_insuree(&self, key: &RecordKey) -> Result<Option<Insuree>> {
        Ok(self
            .fixtures
            .insurees
            .iter()
            .find(|i| key.matches(i.id, i.uuid, i.chf_id.as_deref()))
            .cloned())
    }

    fn find_health_facility(&self, key: &RecordKey) -> Result<Option<HealthFacility>> {
        Ok(self
            .fixtures
            .health_facilities
            .iter()
            .find(|hf| key.matches(hf.id, hf.uuid, hf.code.as_deref()))
            .cloned())
    }

    fn find_location(&self, key: &RecordKey) -> Result<Option<AdministrativeLocation>> {
        Ok(self
            .fixtures
            .locations
            .iter()
            .find(|l| key.matches(l.id, l.uuid, l.code.as_deref()))
            .cloned())
    }

    fn find_claim_admin(&self, key: &RecordKey) -> Result<Option<ClaimAdmin>> {
        Ok(self
            .fixtures
            .claim_admins
            .iter()
            .find(|a| key.matches(a.id, a.uuid, a.code.as_deref()))
            .cloned())
    }

    fn find_claim(&self, key: &RecordKey) -> Result<Option<Claim>> {
        Ok(self
            .fixtures
            .claims
            .iter()
            .find(|c| key.matches(c.id, c.uuid, c.code.as_deref()))
            .cloned())
    }

    fn find_feedback(&self, key: &RecordKey) -> Result<Option<Feedback>> {
        Ok(self
            .fixtures
            .feedbacks
            .iter()
            .find(|f| key.matches(f.id, f.uuid, None))
            .cloned())
    }

    fn find_service(&self, key: &RecordKey) -> Result<Option<Service>> {
        Ok(self
            .fixtures
            .services
            .iter()
            .find(|s| key.matches(s.id, s.uuid, s.code.as_deref()))
            .cloned())
    }

    fn find_medical_item(&self, key: &RecordKey) -> Result<Option<MedicalItem>> {
        Ok(self
            .fixtures
            .medical_items
            .iter()
            .find(|i| key.matches(i.id, i.uuid, i.code.as_deref()))
            .cloned())
    }

    fn find_diagnosis(&self, code: &str) -> Result<Option<DiagnosisCode>> {
        Ok(self
            .fixtures
            .diagnoses
            .iter()
            .find(|d| d.code == code)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lookup_by_each_key_kind() {
        let uuid = uuid::Uuid::new_v4();
        let repository = InMemoryRepository::new().with_insuree(Insuree {
            id: Some(3),
            uuid: Some(uuid),
            chf_id: Some("CHF123".to_string()),
            ..Default::default()
        });
        for key in [
            RecordKey::Id(3),
            RecordKey::Uuid(uuid),
            RecordKey::Code("CHF123".to_string()),
        ] {
            assert!(repository.find_insuree(&key).unwrap().is_some(), "{key}");
        }
        assert!(repository.find_insuree(&RecordKey::Id(4)).unwrap().is_none());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"diagnoses": [{"id": 7, "code": "A01", "name": "Typhoid"}],
                 "claims": [{"id": 1, "code": "CLM1"}]}"#,
        )
        .unwrap();
        file.flush().unwrap();

        let repository = InMemoryRepository::from_json_file(file.path()).unwrap();
        let diagnosis = repository.find_diagnosis("A01").unwrap().unwrap();
        assert_eq!(diagnosis.id, Some(7));
        assert!(repository
            .find_claim(&RecordKey::Code("CLM1".to_string()))
            .unwrap()
            .is_some());
        assert!(repository.fixtures().insurees.is_empty());
    }

    #[test]
    fn test_price_catalog_lookup() {
        let uuid = uuid::Uuid::new_v4();
        let repository = InMemoryRepository::new()
            .with_service(Service {
                uuid: Some(uuid),
                code: Some("CONS".to_string()),
                ..Default::default()
            })
            .with_medical_item(MedicalItem {
                id: Some(5),
                code: Some("PARA500".to_string()),
                ..Default::default()
            });

        let service = repository.find_service(&RecordKey::Uuid(uuid)).unwrap();
        assert_eq!(service.and_then(|s| s.code).as_deref(), Some("CONS"));
        assert!(repository
            .find_medical_item(&RecordKey::Code("PARA500".to_string()))
            .unwrap()
            .is_some());
        assert!(repository
            .find_service(&RecordKey::Code("PARA500".to_string()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_from_json_file_errors() {
        assert!(matches!(
            InMemoryRepository::from_json_file("missing-fixtures.json"),
            Err(FhirError::Io(_))
        ));
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2]").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            InMemoryRepository::from_json_file(file.path()),
            Err(FhirError::Serialization(_))
        ));
    }
}
