//! HealthFacility ↔ Location (R4)
//!
//! On top of the STU3 mapping the R4 Location carries the facility's
//! administrative area: its code as a second identifier, its name after the
//! facility name, its kind as `physicalType` and its parent as `partOf`.

use crate::config::LocationConfig;
use crate::converters::collector::ErrorCollector;
use crate::converters::common::{
    build_codeable_concept, build_fhir_id_identifier, build_fhir_identifier, build_fhir_pk,
    coding_code, find_identifier_value,
};
use crate::converters::location::{
    build_fhir_address_and_telecom, build_fhir_level_type, build_imis_address_and_telecom,
    build_imis_facility_code, build_imis_level, default_facility,
};
use crate::converters::{ConversionContext, FhirConverter, LocationConverter, ReferenceConverter};
use crate::domain::{
    AdministrativeLocation, AuditUser, HealthFacility, ResourceRef, Result,
    LOCATION_TYPE_DISTRICT, LOCATION_TYPE_REGION, LOCATION_TYPE_VILLAGE, LOCATION_TYPE_WARD,
};
use crate::model::FhirObject;

const NAME_SEPARATOR: char = ',';

pub(crate) fn to_fhir_obj(
    ctx: &ConversionContext<'_>,
    facility: &HealthFacility,
) -> Result<FhirObject> {
    tracing::debug!(version = %ctx.version, code = ?facility.code, "Converting health facility to Location");
    let mut location = ctx.new_object(LocationConverter::RESOURCE_TYPE)?;
    build_fhir_pk(&mut location, ctx.version, facility.id, facility.uuid)?;
    build_fhir_identifiers(ctx, &mut location, facility)?;
    location.set_opt("name", fhir_name(facility))?;
    if let Some(level_type) = build_fhir_level_type(ctx, facility)? {
        location.append("type", level_type)?;
    }
    build_fhir_address_and_telecom(ctx, &mut location, facility)?;
    if let Some(area) = &facility.location {
        build_fhir_physical_type(ctx, &mut location, area)?;
        build_fhir_part_of(ctx, &mut location, area)?;
    }
    Ok(location)
}

pub(crate) fn to_imis_obj(
    ctx: &ConversionContext<'_>,
    location: &FhirObject,
    audit_user: Option<&AuditUser>,
) -> Result<HealthFacility> {
    ctx.expect_resource(location, LocationConverter::RESOURCE_TYPE)?;
    tracing::debug!(version = %ctx.version, "Converting Location to health facility");

    let mut errors = ErrorCollector::new();
    let mut facility = default_facility(ctx.config, audit_user);
    let mut area = AdministrativeLocation::default();
    build_imis_facility_code(ctx, &mut facility, location, &mut errors)?;
    area.code = find_identifier_value(ctx, location, &ctx.config.identifier.location_code_type)?
        .map(String::from);
    errors.valid_condition(area.code.is_none(), "Missing location code");
    build_imis_names(&mut facility, &mut area, location, &mut errors)?;
    let level_type = location.objects("type")?.into_iter().next();
    build_imis_level(ctx, &mut facility, level_type, &mut errors)?;
    build_imis_address_and_telecom(&mut facility, location)?;
    build_imis_physical_type(ctx, &mut area, location, &mut errors)?;
    build_imis_parent(&mut area, location, &mut errors)?;
    facility.location = Some(area);
    errors.finish(LocationConverter::RESOURCE_TYPE, facility)
}

/// `"<facility>, <area>"`, or the facility name alone without an area name
fn fhir_name(facility: &HealthFacility) -> Option<String> {
    let area_name = facility.location.as_ref().and_then(|area| area.name.as_deref());
    match (facility.name.as_deref(), area_name) {
        (Some(name), Some(area)) => Some(format!("{name}{NAME_SEPARATOR} {area}")),
        (Some(name), None) => Some(name.to_string()),
        (None, _) => None,
    }
}

fn build_fhir_identifiers(
    ctx: &ConversionContext<'_>,
    location: &mut FhirObject,
    facility: &HealthFacility,
) -> Result<()> {
    let codes = &ctx.config.identifier;
    if let Some(identifier) = build_fhir_id_identifier(ctx, facility.id, facility.uuid)? {
        location.append("identifier", identifier)?;
    }
    if let Some(code) = &facility.code {
        location.append(
            "identifier",
            build_fhir_identifier(ctx, code, &codes.facility_id_type)?,
        )?;
    }
    if let Some(code) = facility.location.as_ref().and_then(|area| area.code.as_ref()) {
        location.append(
            "identifier",
            build_fhir_identifier(ctx, code, &codes.location_code_type)?,
        )?;
    }
    Ok(())
}

fn build_imis_names(
    facility: &mut HealthFacility,
    area: &mut AdministrativeLocation,
    location: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let mut parts = location
        .get_str("name")?
        .unwrap_or_default()
        .splitn(2, NAME_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty());
    facility.name = parts.next().map(String::from);
    area.name = parts.next().map(String::from);
    errors.valid_condition(facility.name.is_none(), "Missing hf `name` attribute");
    errors.valid_condition(area.name.is_none(), "Missing location `name` attribute");
    Ok(())
}

/// Physical type code and text of an administrative location kind
pub fn fhir_physical_type<'a>(
    config: &'a LocationConfig,
    location_type: &str,
) -> Option<(&'a str, &'static str)> {
    let mapped = match location_type {
        LOCATION_TYPE_REGION => (&config.code_for_region, "region"),
        LOCATION_TYPE_DISTRICT => (&config.code_for_district, "district"),
        LOCATION_TYPE_WARD => (&config.code_for_ward, "ward"),
        LOCATION_TYPE_VILLAGE => (&config.code_for_village, "village"),
        _ => return None,
    };
    Some((mapped.0.as_str(), mapped.1))
}

/// Administrative location kind of a physical type code
pub fn imis_location_type(config: &LocationConfig, code: &str) -> Option<&'static str> {
    [
        (&config.code_for_region, LOCATION_TYPE_REGION),
        (&config.code_for_district, LOCATION_TYPE_DISTRICT),
        (&config.code_for_ward, LOCATION_TYPE_WARD),
        (&config.code_for_village, LOCATION_TYPE_VILLAGE),
    ]
    .into_iter()
    .find(|(configured, _)| configured.as_str() == code)
    .map(|(_, location_type)| location_type)
}

fn build_fhir_physical_type(
    ctx: &ConversionContext<'_>,
    location: &mut FhirObject,
    area: &AdministrativeLocation,
) -> Result<()> {
    let config = &ctx.config.location;
    let Some((code, text)) = area
        .location_type
        .as_deref()
        .and_then(|location_type| fhir_physical_type(config, location_type))
    else {
        return Ok(());
    };
    let physical_type = build_codeable_concept(
        ctx,
        Some(code),
        Some(config.physical_type_system.as_str()),
        Some(text),
    )?;
    location.set("physicalType", physical_type)
}

fn build_imis_physical_type(
    ctx: &ConversionContext<'_>,
    area: &mut AdministrativeLocation,
    location: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let config = &ctx.config.location;
    let physical_type = location.get_object("physicalType")?;
    if !errors.valid_condition(
        physical_type.is_none(),
        "Missing location `type` attribute",
    ) {
        if let Some(physical_type) = physical_type {
            area.location_type = coding_code(physical_type, &config.physical_type_system)?
                .and_then(|code| imis_location_type(config, code))
                .map(String::from);
        }
        errors.valid_condition(area.location_type.is_none(), "Missing location type");
    }
    Ok(())
}

fn build_fhir_part_of(
    ctx: &ConversionContext<'_>,
    location: &mut FhirObject,
    area: &AdministrativeLocation,
) -> Result<()> {
    let Some(parent_id) = &area.parent_id else {
        return Ok(());
    };
    let mut reference = ctx.new_object("Reference")?;
    let target = ResourceRef::new(LocationConverter::RESOURCE_TYPE, parent_id.as_str())
        .map_err(crate::domain::FhirError::Property)?;
    reference.set("reference", target.to_string())?;
    location.set("partOf", reference)
}

fn build_imis_parent(
    area: &mut AdministrativeLocation,
    location: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    if let Some(part_of) = location.get_object("partOf")? {
        area.parent_id = LocationConverter::get_resource_id_from_reference(part_of)?;
    }
    errors.valid_condition(
        area.parent_id.is_none(),
        "Missing location `parent id` attribute",
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::FhirConfig;
    use crate::model::FhirVersion;
    use test_case::test_case;
    use uuid::Uuid;

    fn facility() -> HealthFacility {
        HealthFacility {
            uuid: Some(Uuid::new_v4()),
            code: Some("HF001".to_string()),
            name: Some("Central".to_string()),
            level: Some("D".to_string()),
            email: Some("central@example.org".to_string()),
            location: Some(AdministrativeLocation {
                code: Some("R1D1".to_string()),
                name: Some("Dodoma".to_string()),
                location_type: Some("D".to_string()),
                parent_id: Some("17".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test_case("R", "R", "region")]
    #[test_case("D", "D", "district")]
    #[test_case("W", "W", "ward")]
    #[test_case("V", "V", "village")]
    fn test_physical_type_mapping(location_type: &str, code: &str, text: &str) {
        let config = LocationConfig::default();
        assert_eq!(fhir_physical_type(&config, location_type), Some((code, text)));
        assert_eq!(imis_location_type(&config, code), Some(location_type));
    }

    #[test]
    fn test_r4_location_shape() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
        let source = facility();

        let location = LocationConverter::to_fhir_obj(&ctx, &source).unwrap();
        assert_eq!(location.get_str("name").unwrap(), Some("Central, Dodoma"));
        assert_eq!(
            location.get_str("id").unwrap(),
            source.uuid.map(|uuid| uuid.to_string()).as_deref()
        );
        let types = location.objects("type").unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].get_str("text").unwrap(), Some("dispensary"));
        let part_of = location.get_object("partOf").unwrap().unwrap();
        assert_eq!(part_of.get_str("reference").unwrap(), Some("Location/17"));
    }

    #[test]
    fn test_r4_round_trip() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);

        let location = LocationConverter::to_fhir_obj(&ctx, &facility()).unwrap();
        let decoded = LocationConverter::to_imis_obj(&ctx, &location, None).unwrap();
        assert_eq!(decoded.code.as_deref(), Some("HF001"));
        assert_eq!(decoded.name.as_deref(), Some("Central"));
        assert_eq!(decoded.level.as_deref(), Some("D"));
        assert_eq!(decoded.email.as_deref(), Some("central@example.org"));
        let area = decoded.location.unwrap();
        assert_eq!(area.code.as_deref(), Some("R1D1"));
        assert_eq!(area.name.as_deref(), Some("Dodoma"));
        assert_eq!(area.location_type.as_deref(), Some("D"));
        assert_eq!(area.parent_id.as_deref(), Some("17"));
    }

    #[test]
    fn test_r4_missing_area_fields_collected() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
        let source = HealthFacility {
            location: None,
            ..facility()
        };

        let location = LocationConverter::to_fhir_obj(&ctx, &source).unwrap();
        let err = LocationConverter::to_imis_obj(&ctx, &location, None).unwrap_err();
        let issues = err.issues();
        assert!(issues.contains(&"Missing location code".to_string()));
        assert!(issues.contains(&"Missing location `name` attribute".to_string()));
        assert!(issues.contains(&"Missing location `type` attribute".to_string()));
        assert!(issues.contains(&"Missing location `parent id` attribute".to_string()));
        assert!(!issues.contains(&"Missing hf code".to_string()));
    }
}
