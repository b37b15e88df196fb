//! ClaimAdmin ↔ PractitionerRole
//!
//! A role links the claim administrator to the facility they work for. The
//! inbound direction resolves both references through the repository.

use super::collector::ErrorCollector;
use super::common::{build_fhir_id_identifier, build_fhir_pk};
use super::{
    ConversionContext, FhirConverter, LocationConverter, PractitionerConverter, ReferenceConverter,
};
use crate::adapters::RecordKey;
use crate::domain::{AuditUser, ClaimAdmin, HealthFacility, Result};
use crate::model::FhirObject;

pub struct PractitionerRoleConverter;

impl FhirConverter for PractitionerRoleConverter {
    type Record = ClaimAdmin;
    const RESOURCE_TYPE: &'static str = "PractitionerRole";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, admin: &ClaimAdmin) -> Result<FhirObject> {
        tracing::debug!(version = %ctx.version, code = ?admin.code, "Converting claim admin to PractitionerRole");
        let mut role = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut role, ctx.version, admin.id, admin.uuid)?;
        if let Some(identifier) = build_fhir_id_identifier(ctx, admin.id, admin.uuid)? {
            role.append("identifier", identifier)?;
        }
        role.set(
            "practitioner",
            PractitionerConverter::build_fhir_resource_reference(ctx, admin)?,
        )?;
        if let Some(facility) = &admin.health_facility {
            role.append(
                "location",
                LocationConverter::build_fhir_resource_reference(ctx, facility)?,
            )?;
        }
        Ok(role)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        role: &FhirObject,
        _audit_user: Option<&AuditUser>,
    ) -> Result<ClaimAdmin> {
        ctx.expect_resource(role, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting PractitionerRole to claim admin");

        let mut errors = ErrorCollector::new();
        let admin = resolve_practitioner(ctx, role, &mut errors)?;
        let facility = resolve_location(ctx, role, &mut errors)?;
        errors.check(Self::RESOURCE_TYPE)?;

        let mut admin = admin.unwrap_or_default();
        admin.health_facility = facility;
        Ok(admin)
    }
}

fn resolve_practitioner(
    ctx: &ConversionContext<'_>,
    role: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<Option<ClaimAdmin>> {
    let id = match role.get_object("practitioner")? {
        Some(reference) => PractitionerConverter::get_resource_id_from_reference(reference)?,
        None => None,
    };
    let Some(id) = id else {
        errors.push("Could not fetch Practitioner id from reference");
        return Ok(None);
    };
    let admin = PractitionerConverter::find_by_key(ctx, &RecordKey::from_reference_id(ctx.version, &id))?;
    errors.valid_condition(
        admin.is_none(),
        format!("Could not find Practitioner with id {id}"),
    );
    Ok(admin)
}

fn resolve_location(
    ctx: &ConversionContext<'_>,
    role: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<Option<HealthFacility>> {
    let Some(reference) = role.objects("location")?.into_iter().next() else {
        return Ok(None);
    };
    let Some(id) = LocationConverter::get_resource_id_from_reference(reference)? else {
        errors.push("Could not fetch Location id from reference");
        return Ok(None);
    };
    let facility = LocationConverter::find_by_key(ctx, &RecordKey::from_reference_id(ctx.version, &id))?;
    errors.valid_condition(
        facility.is_none(),
        format!("Could not find Location with id {id}"),
    );
    Ok(facility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::FhirConfig;
    use crate::model::FhirVersion;

    fn admin() -> ClaimAdmin {
        ClaimAdmin {
            id: Some(3),
            code: Some("ADM03".to_string()),
            health_facility: Some(HealthFacility {
                id: Some(8),
                code: Some("HF008".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_role_references() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let role = PractitionerRoleConverter::to_fhir_obj(&ctx, &admin()).unwrap();
        let practitioner = role.get_object("practitioner").unwrap().unwrap();
        assert_eq!(
            practitioner.get_str("reference").unwrap(),
            Some("Practitioner/3")
        );
        let locations = role.objects("location").unwrap();
        assert_eq!(locations[0].get_str("reference").unwrap(), Some("Location/8"));
    }

    #[test]
    fn test_resolves_admin_and_facility() {
        let config = FhirConfig::default();
        let source = admin();
        let repository = InMemoryRepository::new()
            .with_claim_admin(ClaimAdmin {
                health_facility: None,
                ..source.clone()
            })
            .with_health_facility(source.health_facility.clone().unwrap());
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let role = PractitionerRoleConverter::to_fhir_obj(&ctx, &source).unwrap();
        let resolved = PractitionerRoleConverter::to_imis_obj(&ctx, &role, None).unwrap();
        assert_eq!(resolved.code.as_deref(), Some("ADM03"));
        assert_eq!(
            resolved.health_facility.and_then(|facility| facility.code).as_deref(),
            Some("HF008")
        );
    }

    #[test]
    fn test_unknown_references_collected() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let role = PractitionerRoleConverter::to_fhir_obj(&ctx, &admin()).unwrap();
        let err = PractitionerRoleConverter::to_imis_obj(&ctx, &role, None).unwrap_err();
        assert_eq!(
            err.issues(),
            [
                "Could not find Practitioner with id 3".to_string(),
                "Could not find Location with id 8".to_string(),
            ]
        );
    }
}
