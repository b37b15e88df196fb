//! Domain records and error types.
//!
//! This module contains the insurance-platform records the converters read
//! and write, plus the crate-wide error type.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`Insuree`], [`HealthFacility`], [`Claim`], [`ClaimAdmin`], [`Feedback`])
//! - **Price catalog** ([`Service`], [`MedicalItem`])
//! - **Reference ids** ([`ResourceRef`])
//! - **Audit identity** ([`AuditUser`])
//! - **Error types** ([`FhirError`]) and the [`Result`] alias
//!
//! Records are plain data owned by the persistence layer. Every field is
//! optional on the wire so partially populated records can be loaded from
//! JSON fixtures:
//!
//! ```rust
//! use imis_fhir::domain::{HealthFacility, HF_LEVEL_HOSPITAL};
//!
//! let facility: HealthFacility = serde_json::from_str(
//!     r#"{"id": 1, "code": "HF001", "name": "Central", "level": "H"}"#,
//! ).unwrap();
//! assert_eq!(facility.level.as_deref(), Some(HF_LEVEL_HOSPITAL));
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FhirError>`]:
//!
//! ```rust
//! use imis_fhir::domain::{FhirError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(FhirError::NotAuthenticated)
//! }
//! assert!(example().is_err());
//! ```

pub mod audit;
pub mod claim;
pub mod claim_admin;
pub mod errors;
pub mod health_facility;
pub mod ids;
pub mod insuree;
pub mod medical;
pub mod result;

// Re-export commonly used types for convenience
pub use audit::AuditUser;
pub use claim::{
    Claim, ClaimItem, ClaimService, DiagnosisCode, DiagnosisSlot, Feedback, CLAIM_STATUS_CHECKED,
    CLAIM_STATUS_ENTERED, CLAIM_STATUS_PROCESSED, CLAIM_STATUS_REJECTED, CLAIM_STATUS_VALUATED,
};
pub use claim_admin::ClaimAdmin;
pub use errors::{FhirError, REQUEST_PROCESS_PREFIX};
pub use health_facility::{
    AdministrativeLocation, HealthFacility, HF_LEVEL_DISPENSARY, HF_LEVEL_HEALTH_CENTER,
    HF_LEVEL_HOSPITAL, LOCATION_TYPE_DISTRICT, LOCATION_TYPE_REGION, LOCATION_TYPE_VILLAGE,
    LOCATION_TYPE_WARD,
};
pub use ids::ResourceRef;
pub use insuree::Insuree;
pub use medical::{
    MedicalItem, Service, PATIENT_CATEGORY_ADULT, PATIENT_CATEGORY_CHILD, PATIENT_CATEGORY_FEMALE,
    PATIENT_CATEGORY_MALE,
};
pub use result::Result;
