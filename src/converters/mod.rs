//! Domain ↔ FHIR converters
//!
//! One converter per domain record. Each converter is a unit struct
//! implementing [`FhirConverter`]; converters whose resources can be pointed
//! at by a `Reference` also implement [`ReferenceConverter`].
//!
//! # Overview
//!
//! - `to_fhir_obj` builds a resource field group by field group and leaves
//!   absent domain fields unset.
//! - `to_imis_obj` extracts a domain record, collecting every validation
//!   message in an [`ErrorCollector`] and failing once with
//!   [`FhirError::RequestProcess`] after all fields were attempted.
//!
//! Everything a conversion needs travels in a [`ConversionContext`]: the FHIR
//! version, the loaded configuration and the repository used to resolve
//! references.
//!
//! The price catalog converters ([`ActivityDefinitionConverter`],
//! [`MedicationConverter`]) only accept R4 contexts.
//!
//! ```rust
//! use imis_fhir::adapters::InMemoryRepository;
//! use imis_fhir::config::FhirConfig;
//! use imis_fhir::converters::{ConversionContext, FhirConverter, PatientConverter};
//! use imis_fhir::domain::Insuree;
//! use imis_fhir::model::FhirVersion;
//!
//! let config = FhirConfig::default();
//! let repository = InMemoryRepository::new();
//! let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
//!
//! let insuree = Insuree {
//!     last_name: Some("Doe".to_string()),
//!     other_names: Some("Jane".to_string()),
//!     ..Default::default()
//! };
//! let patient = PatientConverter::to_fhir_obj(&ctx, &insuree).unwrap();
//! assert_eq!(patient.type_name(), "Patient");
//! ```

pub mod claim;
pub mod claim_response;
pub mod collector;
pub mod common;
pub mod communication_request;
pub mod location;
pub mod operation_outcome;
pub mod patient;
pub mod practitioner;
pub mod practitioner_role;
pub mod r4;

pub use claim::ClaimConverter;
pub use claim_response::ClaimResponseConverter;
pub use collector::ErrorCollector;
pub use communication_request::CommunicationRequestConverter;
pub use location::LocationConverter;
pub use operation_outcome::OperationOutcomeConverter;
pub use patient::PatientConverter;
pub use practitioner::PractitionerConverter;
pub use practitioner_role::PractitionerRoleConverter;
pub use r4::{ActivityDefinitionConverter, MedicationConverter};

use crate::adapters::{ImisRepository, RecordKey};
use crate::config::FhirConfig;
use crate::domain::{AuditUser, FhirError, ResourceRef, Result};
use crate::model::{FhirObject, FhirVersion};

/// Per-call inputs shared by every converter
#[derive(Clone, Copy)]
pub struct ConversionContext<'a> {
    pub version: FhirVersion,
    pub config: &'a FhirConfig,
    pub repository: &'a dyn ImisRepository,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        version: FhirVersion,
        config: &'a FhirConfig,
        repository: &'a dyn ImisRepository,
    ) -> Self {
        Self {
            version,
            config,
            repository,
        }
    }

    /// Creates an empty object of type `name` in the context's version
    pub fn new_object(&self, name: &str) -> Result<FhirObject> {
        FhirObject::create(self.version, name)
    }

    /// Fails unless `resource` is a `expected` resource of the context's version
    pub fn expect_resource(&self, resource: &FhirObject, expected: &str) -> Result<()> {
        if resource.version() != self.version || !resource.schema().is_subtype_of(expected) {
            return Err(FhirError::Marshalling(format!(
                "Expected a {} {} resource but got {} {}",
                self.version,
                expected,
                resource.version(),
                resource.type_name()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConversionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionContext")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Mapping between one domain record type and one FHIR resource type
pub trait FhirConverter {
    /// Domain record produced and consumed by the converter
    type Record;

    /// Name of the FHIR resource type
    const RESOURCE_TYPE: &'static str;

    /// Builds the FHIR resource for a domain record
    fn to_fhir_obj(ctx: &ConversionContext<'_>, record: &Self::Record) -> Result<FhirObject>;

    /// Extracts a domain record from a FHIR resource
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::RequestProcess`] listing every missing or invalid
    /// field; no partially filled record is returned.
    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        resource: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<Self::Record>;
}

/// Converters whose resources are targets of `Reference`s
pub trait ReferenceConverter: FhirConverter {
    /// Id written after the resource type in a reference, if the record has one
    fn reference_id(ctx: &ConversionContext<'_>, record: &Self::Record) -> Option<String>;

    /// Looks up the record addressed by a reference id
    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<Self::Record>>;

    /// Builds a `Reference` of the form `"<ResourceType>/<id>"`
    fn build_fhir_resource_reference(
        ctx: &ConversionContext<'_>,
        record: &Self::Record,
    ) -> Result<FhirObject> {
        let mut reference = ctx.new_object("Reference")?;
        if let Some(id) = Self::reference_id(ctx, record) {
            let target = ResourceRef::new(Self::RESOURCE_TYPE, id).map_err(FhirError::Property)?;
            reference.set("reference", target.to_string())?;
        }
        Ok(reference)
    }

    /// Id part of a reference to this converter's resource type
    fn get_resource_id_from_reference(reference: &FhirObject) -> Result<Option<String>> {
        let Some(raw) = reference.get_str("reference")? else {
            return Ok(None);
        };
        Ok(ResourceRef::parse(raw)
            .ok()
            .filter(|parsed| parsed.resource_type() == Self::RESOURCE_TYPE)
            .map(|parsed| parsed.id().to_string()))
    }

    /// Resolves the domain record a reference points at
    fn get_imis_obj_by_fhir_reference(
        ctx: &ConversionContext<'_>,
        reference: &FhirObject,
    ) -> Result<Option<Self::Record>> {
        match Self::get_resource_id_from_reference(reference)? {
            Some(id) => Self::find_by_key(ctx, &RecordKey::from_reference_id(ctx.version, &id)),
            None => Ok(None),
        }
    }
}
