//! Persistence integration
//!
//! - [`repository`] - the [`ImisRepository`] lookup trait and [`RecordKey`]
//! - [`memory`] - [`InMemoryRepository`], loaded from JSON fixtures
//!
//! # Design Pattern
//!
//! Converters depend on the trait only, so the real persistence layer can be
//! plugged in without touching the mapping code, and tests run against the
//! in-memory implementation:
//!
//! ```rust
//! use imis_fhir::adapters::{ImisRepository, InMemoryRepository, RecordKey};
//! use imis_fhir::domain::DiagnosisCode;
//!
//! let repository = InMemoryRepository::new().with_diagnosis(DiagnosisCode::new("A01"));
//! assert!(repository.find_diagnosis("A01").unwrap().is_some());
//! assert!(repository.find_claim(&RecordKey::Id(1)).unwrap().is_none());
//! ```

pub mod memory;
pub mod repository;

pub use memory::{InMemoryRepository, RepositoryFixtures};
pub use repository::{ImisRepository, RecordKey};
