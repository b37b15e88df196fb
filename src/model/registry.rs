//! Type registry
//!
//! A [`Registry`] holds the resolved [`Schema`] of every type of one FHIR
//! version. It is built in two phases from the static catalog:
//!
//! 1. **Declare**: every [`TypeDef`] is registered by name, duplicates fail.
//! 2. **Resolve**: parent chains are followed, inherited properties are laid
//!    out ahead of the type's own, property declarations are validated, and
//!    every [`PropertyType::Named`] reference must name a registered type.
//!
//! Types may therefore reference each other in any order, including cycles
//! such as `Identifier.assigner -> Reference -> Reference.identifier`.
//!
//! The per-version registries are built once, on first use, and shared for the
//! lifetime of the process:
//!
//! ```
//! use imis_fhir::model::{FhirVersion, Registry};
//!
//! let registry = Registry::get(FhirVersion::Stu3).unwrap();
//! let patient = registry.resolve("Patient").unwrap();
//! assert!(patient.is_resource());
//! assert!(patient.is_subtype_of("DomainResource"));
//! assert_eq!(patient.properties()[0].name(), "id");
//! ```

use super::catalog;
use super::object::FhirObject;
use super::property::{PropertyDescriptor, PropertyType, TypeDef};
use crate::domain::{FhirError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Root of the resource hierarchy
pub const RESOURCE_ROOT: &str = "Resource";

/// Supported FHIR releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FhirVersion {
    Stu3,
    R4,
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FhirVersion::Stu3 => write!(f, "stu3"),
            FhirVersion::R4 => write!(f, "r4"),
        }
    }
}

impl FromStr for FhirVersion {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stu3" | "3" | "3.0" => Ok(FhirVersion::Stu3),
            "r4" | "4" | "4.0" => Ok(FhirVersion::R4),
            other => Err(FhirError::NotSupported(format!(
                "FHIR version '{other}'. Valid values: stu3, r4"
            ))),
        }
    }
}

/// Resolved type: lineage plus the full ordered property list
#[derive(Debug)]
pub struct Schema {
    version: FhirVersion,
    name: &'static str,
    /// Ancestors, nearest first
    ancestors: Vec<&'static str>,
    /// Inherited properties first, then the type's own
    properties: Vec<&'static PropertyDescriptor>,
}

impl Schema {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> FhirVersion {
        self.version
    }

    pub fn ancestors(&self) -> &[&'static str] {
        &self.ancestors
    }

    pub fn properties(&self) -> &[&'static PropertyDescriptor] {
        &self.properties
    }

    /// Looks up a declared or inherited property
    pub fn property(&self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties.iter().copied().find(|p| p.name() == name)
    }

    /// Whether this type is `name` or derives from it
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.name == name || self.ancestors.contains(&name)
    }

    /// Whether this type derives from `Resource`
    pub fn is_resource(&self) -> bool {
        self.is_subtype_of(RESOURCE_ROOT)
    }
}

/// All resolved types of one FHIR version
#[derive(Debug)]
pub struct Registry {
    version: FhirVersion,
    schemas: HashMap<&'static str, Schema>,
}

static STU3_REGISTRY: OnceLock<std::result::Result<Registry, String>> = OnceLock::new();
static R4_REGISTRY: OnceLock<std::result::Result<Registry, String>> = OnceLock::new();

impl Registry {
    /// Shared registry of `version`, built on first use
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Schema`] if the catalog for `version` is invalid.
    /// The failure is cached, so every later call reports the same error.
    pub fn get(version: FhirVersion) -> Result<&'static Registry> {
        let cell = match version {
            FhirVersion::Stu3 => &STU3_REGISTRY,
            FhirVersion::R4 => &R4_REGISTRY,
        };
        cell.get_or_init(|| {
            Registry::build(version, &catalog::types_for(version)).map_err(|e| match e {
                FhirError::Schema(message) => message,
                other => other.to_string(),
            })
        })
        .as_ref()
        .map_err(|message| FhirError::Schema(message.clone()))
    }

    /// Builds a registry from type definitions
    pub fn build(version: FhirVersion, defs: &[&'static TypeDef]) -> Result<Self> {
        // Phase 1: declare
        let mut declared: HashMap<&'static str, &'static TypeDef> = HashMap::new();
        for def in defs {
            if declared.insert(def.name, def).is_some() {
                return Err(FhirError::Schema(format!(
                    "type `{}` is declared twice for {version}",
                    def.name
                )));
            }
        }

        // Phase 2: resolve
        let mut schemas = HashMap::with_capacity(declared.len());
        for def in defs {
            let lineage = Self::lineage(def, &declared)?;
            let mut properties: Vec<&'static PropertyDescriptor> = Vec::new();
            let mut seen = HashSet::new();
            for ancestor in lineage.iter().rev() {
                for property in ancestor.properties {
                    property.validate()?;
                    if !seen.insert(property.name()) {
                        return Err(FhirError::Schema(format!(
                            "property `{}` is declared twice in `{}`",
                            property.name(),
                            def.name
                        )));
                    }
                    if let PropertyType::Named(target) = property.kind() {
                        if !declared.contains_key(target) {
                            return Err(FhirError::Schema(format!(
                                "unresolved type `{target}` for property `{}.{}`",
                                ancestor.name,
                                property.name()
                            )));
                        }
                    }
                    properties.push(property);
                }
            }
            let ancestors = lineage.iter().skip(1).map(|d| d.name).collect();
            schemas.insert(
                def.name,
                Schema {
                    version,
                    name: def.name,
                    ancestors,
                    properties,
                },
            );
        }

        tracing::debug!(version = %version, types = schemas.len(), "FHIR type registry built");
        Ok(Self { version, schemas })
    }

    /// The type followed by its ancestors, nearest first
    fn lineage(
        def: &'static TypeDef,
        declared: &HashMap<&'static str, &'static TypeDef>,
    ) -> Result<Vec<&'static TypeDef>> {
        let mut lineage = vec![def];
        let mut current = def;
        while let Some(parent) = current.parent {
            let parent_def = declared.get(parent).copied().ok_or_else(|| {
                FhirError::Schema(format!(
                    "unresolved parent type `{parent}` of `{}`",
                    current.name
                ))
            })?;
            if lineage.iter().any(|d| d.name == parent_def.name) {
                return Err(FhirError::Schema(format!(
                    "inheritance cycle through `{}`",
                    parent_def.name
                )));
            }
            lineage.push(parent_def);
            current = parent_def;
        }
        Ok(lineage)
    }

    pub fn version(&self) -> FhirVersion {
        self.version
    }

    pub fn find(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Looks up a type by name
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Schema`] for an unknown name.
    pub fn resolve(&self, name: &str) -> Result<&Schema> {
        self.find(name)
            .ok_or_else(|| FhirError::Schema(format!("unknown type `{name}` in {}", self.version)))
    }

    /// Names of every registered type
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl Registry {
    /// Creates an empty object of type `name` from the shared registry
    pub fn create(version: FhirVersion, name: &str) -> Result<FhirObject> {
        let schema = Registry::get(version)?.resolve(name)?;
        Ok(FhirObject::new(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::property::PropertyType::{Named, Str};

    static BASE: TypeDef = TypeDef::new("Base", None, &[PropertyDescriptor::scalar("id", Str)]);
    static CHILD: TypeDef = TypeDef::new(
        "Child",
        Some("Base"),
        &[
            PropertyDescriptor::scalar("label", Str),
            PropertyDescriptor::scalar("link", Named("Link")),
        ],
    );
    static LINK: TypeDef = TypeDef::new(
        "Link",
        Some("Base"),
        &[PropertyDescriptor::scalar("target", Named("Child"))],
    );
    static ORPHAN: TypeDef = TypeDef::new(
        "Orphan",
        None,
        &[PropertyDescriptor::scalar("ghost", Named("Missing"))],
    );
    static SPACED: TypeDef = TypeDef::new(
        "Spaced",
        None,
        &[PropertyDescriptor::scalar("bad name", Str)],
    );
    static SHADOW: TypeDef = TypeDef::new(
        "Shadow",
        Some("Base"),
        &[PropertyDescriptor::scalar("id", Str)],
    );

    #[test]
    fn test_forward_references_resolve() {
        let registry = Registry::build(FhirVersion::Stu3, &[&CHILD, &LINK, &BASE]).unwrap();
        let child = registry.resolve("Child").unwrap();
        let names: Vec<_> = child.properties().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["id", "label", "link"]);
        assert!(child.is_subtype_of("Base"));
        assert!(!child.is_resource());
    }

    #[test]
    fn test_unresolved_type_fails() {
        let err = Registry::build(FhirVersion::Stu3, &[&ORPHAN]).unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_invalid_property_name_fails() {
        let err = Registry::build(FhirVersion::Stu3, &[&SPACED]).unwrap_err();
        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn test_duplicate_type_and_property_fail() {
        assert!(Registry::build(FhirVersion::R4, &[&BASE, &BASE]).is_err());
        assert!(Registry::build(FhirVersion::R4, &[&BASE, &SHADOW]).is_err());
    }

    #[test]
    fn test_missing_parent_fails() {
        let err = Registry::build(FhirVersion::R4, &[&CHILD, &LINK]).unwrap_err();
        assert!(err.to_string().contains("Base"));
    }

    #[test]
    fn test_shared_registries_build() {
        for version in [FhirVersion::Stu3, FhirVersion::R4] {
            let registry = Registry::get(version).unwrap();
            assert_eq!(registry.version(), version);
            for name in ["Patient", "Location", "Claim", "ClaimResponse", "OperationOutcome"] {
                assert!(registry.resolve(name).unwrap().is_resource(), "{name}");
            }
            assert!(!registry.resolve("Coding").unwrap().is_resource());
        }
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("STU3".parse::<FhirVersion>().unwrap(), FhirVersion::Stu3);
        assert_eq!("r4".parse::<FhirVersion>().unwrap(), FhirVersion::R4);
        assert!("r5".parse::<FhirVersion>().is_err());
    }
}
