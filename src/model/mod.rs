//! FHIR object model
//!
//! This module replaces dynamic attribute handling with a static schema:
//!
//! - [`property`]: `PropertyDescriptor` and `TypeDef`, declared as statics
//! - [`catalog`]: the STU3 and R4 type definitions
//! - [`registry`]: two-phase resolution of the catalog into per-version schemas
//! - [`object`]: `FhirObject`, whose reads and writes are validated against
//!   its schema
//! - [`value`]: the `FhirValue` union stored in object slots
//! - [`date`]: the `FhirDate` literal
//! - [`codec`]: JSON encoding and decoding
//!
//! # Example
//!
//! ```rust
//! use imis_fhir::model::{FhirObject, FhirVersion};
//!
//! let mut coding = FhirObject::create(FhirVersion::R4, "Coding").unwrap();
//! coding.set("system", "http://hl7.org/fhir/v3/MaritalStatus").unwrap();
//! coding.set("code", "M").unwrap();
//!
//! let mut marital = coding.sibling("CodeableConcept").unwrap();
//! marital.append("coding", coding).unwrap();
//!
//! let mut patient = FhirObject::create(FhirVersion::R4, "Patient").unwrap();
//! patient.set("maritalStatus", marital).unwrap();
//! assert!(patient.to_json().unwrap().contains("\"code\": \"M\""));
//! ```

pub mod catalog;
pub mod codec;
pub mod date;
pub mod object;
pub mod property;
pub mod registry;
pub mod value;

pub use codec::{Format, RESOURCE_TYPE_KEY};
pub use date::FhirDate;
pub use object::FhirObject;
pub use property::{MaxCount, PropertyDescriptor, PropertyType, TypeDef};
pub use registry::{FhirVersion, Registry, Schema};
pub use value::FhirValue;
