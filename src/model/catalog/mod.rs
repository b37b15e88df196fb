//! Static type catalog
//!
//! Each submodule declares the [`TypeDef`]s of one resource family. Types
//! whose shape is the same in STU3 and R4 are declared once; version-specific
//! variants live in `STU3_TYPES` / `R4_TYPES` slices next to them.

use super::property::TypeDef;
use super::registry::FhirVersion;

pub mod claim;
pub mod claim_response;
pub mod communication;
pub mod datatypes;
pub mod location;
pub mod medical;
pub mod operation_outcome;
pub mod patient;
pub mod practitioner;
pub mod resource;

/// Every type definition of `version`
pub fn types_for(version: FhirVersion) -> Vec<&'static TypeDef> {
    let shared: [&[&'static TypeDef]; 8] = [
        datatypes::TYPES,
        resource::TYPES,
        patient::TYPES,
        practitioner::TYPES,
        claim::TYPES,
        claim_response::TYPES,
        communication::TYPES,
        operation_outcome::TYPES,
    ];
    let specific: [&[&'static TypeDef]; 4] = match version {
        FhirVersion::Stu3 => [
            location::STU3_TYPES,
            claim::STU3_TYPES,
            claim_response::STU3_TYPES,
            medical::STU3_TYPES,
        ],
        FhirVersion::R4 => [
            location::R4_TYPES,
            claim::R4_TYPES,
            claim_response::R4_TYPES,
            medical::R4_TYPES,
        ],
    };
    shared
        .iter()
        .chain(specific.iter())
        .flat_map(|defs| defs.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_names_unique_per_version() {
        for version in [FhirVersion::Stu3, FhirVersion::R4] {
            let defs = types_for(version);
            let names: HashSet<_> = defs.iter().map(|d| d.name).collect();
            assert_eq!(names.len(), defs.len(), "{version}");
        }
    }

    #[test]
    fn test_versions_differ_in_location_type() {
        let stu3 = types_for(FhirVersion::Stu3);
        let r4 = types_for(FhirVersion::R4);
        let location_type = |defs: &[&TypeDef]| {
            defs.iter()
                .find(|d| d.name == "Location")
                .and_then(|d| d.properties.iter().find(|p| p.name() == "type"))
                .map(|p| p.is_list())
        };
        assert_eq!(location_type(&stu3), Some(false));
        assert_eq!(location_type(&r4), Some(true));
        assert!(r4.iter().any(|d| d.name == "ClaimResponseTotal"));
        assert!(!stu3.iter().any(|d| d.name == "ClaimResponseTotal"));
    }

    #[test]
    fn test_price_catalog_resources_r4_only() {
        for name in ["ActivityDefinition", "Medication"] {
            assert!(types_for(FhirVersion::R4).iter().any(|d| d.name == name));
            assert!(!types_for(FhirVersion::Stu3).iter().any(|d| d.name == name));
        }
    }
}
