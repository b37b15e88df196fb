//! HealthFacility ↔ Location (STU3)
//!
//! The facility level is written as the Location `type` under the service
//! delivery role system. R4 adds the administrative area, see
//! [`r4::location`](super::r4::location).

use super::collector::ErrorCollector;
use super::common::{
    build_codeable_concept, build_fhir_address, build_fhir_contact_point, build_fhir_id_identifier,
    build_fhir_identifier, build_fhir_pk, coding_code, find_identifier_value, reference_id,
    ADDRESS_TYPE_PHYSICAL, ADDRESS_USE_HOME, CONTACT_SYSTEM_EMAIL, CONTACT_SYSTEM_FAX,
    CONTACT_SYSTEM_PHONE, CONTACT_USE_HOME,
};
use super::{ConversionContext, FhirConverter, ReferenceConverter};
use crate::adapters::RecordKey;
use crate::config::{FhirConfig, LocationConfig};
use crate::domain::{
    AuditUser, HealthFacility, Result, HF_LEVEL_DISPENSARY, HF_LEVEL_HEALTH_CENTER,
    HF_LEVEL_HOSPITAL,
};
use crate::model::{FhirObject, FhirVersion};

pub struct LocationConverter;

impl FhirConverter for LocationConverter {
    type Record = HealthFacility;
    const RESOURCE_TYPE: &'static str = "Location";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, facility: &HealthFacility) -> Result<FhirObject> {
        if ctx.version == FhirVersion::R4 {
            return super::r4::location::to_fhir_obj(ctx, facility);
        }
        tracing::debug!(version = %ctx.version, code = ?facility.code, "Converting health facility to Location");
        let mut location = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut location, ctx.version, facility.id, facility.uuid)?;
        build_fhir_identifiers(ctx, &mut location, facility)?;
        location.set_opt("name", facility.name.as_deref())?;
        if let Some(level_type) = build_fhir_level_type(ctx, facility)? {
            location.set("type", level_type)?;
        }
        build_fhir_address_and_telecom(ctx, &mut location, facility)?;
        Ok(location)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        location: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<HealthFacility> {
        if ctx.version == FhirVersion::R4 {
            return super::r4::location::to_imis_obj(ctx, location, audit_user);
        }
        ctx.expect_resource(location, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting Location to health facility");

        let mut errors = ErrorCollector::new();
        let mut facility = default_facility(ctx.config, audit_user);
        build_imis_facility_code(ctx, &mut facility, location, &mut errors)?;
        build_imis_facility_name(&mut facility, location, &mut errors)?;
        let level_type = location.get_object("type")?;
        build_imis_level(ctx, &mut facility, level_type, &mut errors)?;
        build_imis_address_and_telecom(&mut facility, location)?;
        errors.finish(Self::RESOURCE_TYPE, facility)
    }
}

impl ReferenceConverter for LocationConverter {
    fn reference_id(ctx: &ConversionContext<'_>, facility: &HealthFacility) -> Option<String> {
        reference_id(ctx.version, facility.id, facility.uuid)
    }

    fn find_by_key(
        ctx: &ConversionContext<'_>,
        key: &RecordKey,
    ) -> Result<Option<HealthFacility>> {
        ctx.repository.find_health_facility(key)
    }
}

/// New facility carrying the configured defaults and the audit id
pub(crate) fn default_facility(config: &FhirConfig, audit_user: Option<&AuditUser>) -> HealthFacility {
    let default_id = config.general.default_audit_user_id;
    HealthFacility {
        offline: config.general.default_location_offline,
        care_type: Some(config.general.default_location_care_type.clone()),
        validity_from: Some(chrono::Utc::now().naive_utc()),
        audit_user_id: Some(audit_user.map_or(default_id, |user| user.audit_id(default_id))),
        ..Default::default()
    }
}

/// Role type code of a facility level
pub fn fhir_level_code<'a>(config: &'a LocationConfig, level: &str) -> Option<&'a str> {
    let code = match level {
        HF_LEVEL_HOSPITAL => &config.code_for_hospital,
        HF_LEVEL_DISPENSARY => &config.code_for_dispensary,
        HF_LEVEL_HEALTH_CENTER => &config.code_for_health_center,
        _ => return None,
    };
    Some(code.as_str())
}

/// Facility level of a role type code
pub fn imis_level(config: &LocationConfig, code: &str) -> Option<&'static str> {
    if code == config.code_for_hospital {
        Some(HF_LEVEL_HOSPITAL)
    } else if code == config.code_for_dispensary {
        Some(HF_LEVEL_DISPENSARY)
    } else if code == config.code_for_health_center {
        Some(HF_LEVEL_HEALTH_CENTER)
    } else {
        None
    }
}

/// Display text of a facility level
pub fn level_text(level: &str) -> Option<&'static str> {
    match level {
        HF_LEVEL_HOSPITAL => Some("hospital"),
        HF_LEVEL_DISPENSARY => Some("dispensary"),
        HF_LEVEL_HEALTH_CENTER => Some("health center"),
        _ => None,
    }
}

/// Level CodeableConcept, `None` for an absent or unmapped level
pub(crate) fn build_fhir_level_type(
    ctx: &ConversionContext<'_>,
    facility: &HealthFacility,
) -> Result<Option<FhirObject>> {
    let config = &ctx.config.location;
    let Some(level) = facility.level.as_deref() else {
        return Ok(None);
    };
    let Some(code) = fhir_level_code(config, level) else {
        return Ok(None);
    };
    let text = match ctx.version {
        FhirVersion::Stu3 => None,
        FhirVersion::R4 => level_text(level),
    };
    build_codeable_concept(ctx, Some(code), Some(config.role_type_system.as_str()), text).map(Some)
}

pub(crate) fn build_imis_level(
    ctx: &ConversionContext<'_>,
    facility: &mut HealthFacility,
    level_type: Option<&FhirObject>,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let config = &ctx.config.location;
    if !errors.valid_condition(level_type.is_none(), "Missing hf `type` attribute") {
        if let Some(level_type) = level_type {
            facility.level = coding_code(level_type, &config.role_type_system)?
                .and_then(|code| imis_level(config, code))
                .map(String::from);
        }
        errors.valid_condition(facility.level.is_none(), "Missing hf level");
    }
    Ok(())
}

fn build_fhir_identifiers(
    ctx: &ConversionContext<'_>,
    location: &mut FhirObject,
    facility: &HealthFacility,
) -> Result<()> {
    if let Some(identifier) = build_fhir_id_identifier(ctx, facility.id, facility.uuid)? {
        location.append("identifier", identifier)?;
    }
    if let Some(code) = &facility.code {
        location.append(
            "identifier",
            build_fhir_identifier(ctx, code, &ctx.config.identifier.facility_id_type)?,
        )?;
    }
    Ok(())
}

pub(crate) fn build_imis_facility_code(
    ctx: &ConversionContext<'_>,
    facility: &mut HealthFacility,
    location: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    facility.code = find_identifier_value(ctx, location, &ctx.config.identifier.facility_id_type)?
        .map(String::from);
    errors.valid_condition(facility.code.is_none(), "Missing hf code");
    Ok(())
}

fn build_imis_facility_name(
    facility: &mut HealthFacility,
    location: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    facility.name = location.get_str("name")?.map(String::from);
    errors.valid_condition(facility.name.is_none(), "Missing hf `name` attribute");
    Ok(())
}

pub(crate) fn build_fhir_address_and_telecom(
    ctx: &ConversionContext<'_>,
    location: &mut FhirObject,
    facility: &HealthFacility,
) -> Result<()> {
    if let Some(address) = &facility.address {
        location.set(
            "address",
            build_fhir_address(ctx, address, ADDRESS_USE_HOME, ADDRESS_TYPE_PHYSICAL)?,
        )?;
    }
    let contacts = [
        (CONTACT_SYSTEM_PHONE, &facility.phone),
        (CONTACT_SYSTEM_FAX, &facility.fax),
        (CONTACT_SYSTEM_EMAIL, &facility.email),
    ];
    for (system, value) in contacts {
        if let Some(value) = value {
            location.append(
                "telecom",
                build_fhir_contact_point(ctx, value, system, CONTACT_USE_HOME)?,
            )?;
        }
    }
    Ok(())
}

pub(crate) fn build_imis_address_and_telecom(
    facility: &mut HealthFacility,
    location: &FhirObject,
) -> Result<()> {
    if let Some(address) = location.get_object("address")? {
        if address.get_str("type")? == Some(ADDRESS_TYPE_PHYSICAL) {
            facility.address = address.get_str("text")?.map(String::from);
        }
    }
    for contact_point in location.objects("telecom")? {
        let value = contact_point.get_str("value")?.map(String::from);
        match contact_point.get_str("system")? {
            Some(CONTACT_SYSTEM_PHONE) => facility.phone = value,
            Some(CONTACT_SYSTEM_FAX) => facility.fax = value,
            Some(CONTACT_SYSTEM_EMAIL) => facility.email = value,
            _ => {}
        }
    }
    Ok(())
}
