// IMIS FHIR - FHIR resource mapping for the IMIS insurance platform
// Copyright (c) 2025 IMIS FHIR Contributors
// Licensed under the MIT License

//! # IMIS FHIR - FHIR resource mapping for IMIS
//!
//! Converts the records of the IMIS health-insurance platform (insurees,
//! health facilities, claim administrators, claims, feedback) to and from
//! FHIR STU3 and R4 resources.
//!
//! ## Overview
//!
//! - A **declarative object model**: every FHIR type is a static list of
//!   property descriptors, and every read and write on a [`model::FhirObject`]
//!   is checked against it
//! - **JSON marshalling** with `resourceType` polymorphism
//! - **Converters** per resource, collecting every validation message before
//!   failing once
//! - **OperationOutcome** rendering of any failure
//!
//! ## Architecture
//!
//! - [`model`] - Property descriptors, type catalog, objects and JSON codec
//! - [`converters`] - Domain ↔ FHIR mapping
//! - [`adapters`] - Repository lookups used to resolve references
//! - [`domain`] - Domain records and error types
//! - [`config`] - Code systems, defaults and formats
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use imis_fhir::adapters::InMemoryRepository;
//! use imis_fhir::config::FhirConfig;
//! use imis_fhir::converters::{ConversionContext, FhirConverter, PatientConverter};
//! use imis_fhir::domain::{AuditUser, Insuree};
//! use imis_fhir::model::FhirVersion;
//!
//! # fn main() -> imis_fhir::domain::Result<()> {
//! let config = FhirConfig::default();
//! let repository = InMemoryRepository::new();
//! let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
//!
//! let insuree = Insuree {
//!     chf_id: Some("CHF123".to_string()),
//!     last_name: Some("Doe".to_string()),
//!     other_names: Some("Jane".to_string()),
//!     dob: chrono::NaiveDate::from_ymd_opt(1990, 3, 24),
//!     ..Default::default()
//! };
//! let json = PatientConverter::to_fhir_obj(&ctx, &insuree)?.to_json()?;
//!
//! let patient = imis_fhir::model::FhirObject::from_json(FhirVersion::R4, "Patient", &json)?;
//! let user = AuditUser::new("admin", 1);
//! let decoded = PatientConverter::to_imis_obj(&ctx, &patient, Some(&user))?;
//! assert_eq!(decoded.chf_id.as_deref(), Some("CHF123"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Shape and type errors surface immediately. Converter validation failures
//! are aggregated into [`domain::FhirError::RequestProcess`], which renders
//! as one message listing every issue:
//!
//! ```rust
//! use imis_fhir::domain::FhirError;
//!
//! let error = FhirError::RequestProcess(vec![
//!     "Missing patient family name".to_string(),
//!     "Missing patient given name".to_string(),
//! ]);
//! assert!(error.to_string().ends_with("Missing patient family name,\nMissing patient given name"));
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod converters;
pub mod domain;
pub mod logging;
pub mod model;
