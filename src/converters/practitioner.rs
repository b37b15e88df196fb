//! ClaimAdmin ↔ Practitioner

use super::collector::ErrorCollector;
use super::common::{
    build_fhir_contact_point, build_fhir_id_identifier, build_fhir_identifier, build_fhir_name,
    build_fhir_pk, find_identifier_value, find_usual_name, format_date, parse_date, reference_id,
    CONTACT_SYSTEM_EMAIL, CONTACT_SYSTEM_PHONE, CONTACT_USE_HOME,
};
use super::{ConversionContext, FhirConverter, ReferenceConverter};
use crate::adapters::RecordKey;
use crate::domain::{AuditUser, ClaimAdmin, Result};
use crate::model::FhirObject;

pub struct PractitionerConverter;

impl FhirConverter for PractitionerConverter {
    type Record = ClaimAdmin;
    const RESOURCE_TYPE: &'static str = "Practitioner";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, admin: &ClaimAdmin) -> Result<FhirObject> {
        tracing::debug!(version = %ctx.version, code = ?admin.code, "Converting claim admin to Practitioner");
        let mut practitioner = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut practitioner, ctx.version, admin.id, admin.uuid)?;
        if let Some(identifier) = build_fhir_id_identifier(ctx, admin.id, admin.uuid)? {
            practitioner.append("identifier", identifier)?;
        }
        if let Some(code) = &admin.code {
            practitioner.append(
                "identifier",
                build_fhir_identifier(ctx, code, &ctx.config.identifier.claim_admin_code_type)?,
            )?;
        }
        if let Some(name) =
            build_fhir_name(ctx, admin.last_name.as_deref(), admin.other_names.as_deref())?
        {
            practitioner.append("name", name)?;
        }
        if let Some(dob) = admin.dob {
            practitioner.set("birthDate", format_date(ctx, dob)?)?;
        }
        if let Some(phone) = &admin.phone {
            practitioner.append(
                "telecom",
                build_fhir_contact_point(ctx, phone, CONTACT_SYSTEM_PHONE, CONTACT_USE_HOME)?,
            )?;
        }
        if let Some(email) = &admin.email {
            practitioner.append(
                "telecom",
                build_fhir_contact_point(ctx, email, CONTACT_SYSTEM_EMAIL, CONTACT_USE_HOME)?,
            )?;
        }
        Ok(practitioner)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        practitioner: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<ClaimAdmin> {
        ctx.expect_resource(practitioner, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting Practitioner to claim admin");

        let mut errors = ErrorCollector::new();
        let default_id = ctx.config.general.default_audit_user_id;
        let mut admin = ClaimAdmin {
            audit_user_id: Some(audit_user.map_or(default_id, |user| user.audit_id(default_id))),
            ..Default::default()
        };

        admin.code = find_identifier_value(
            ctx,
            practitioner,
            &ctx.config.identifier.claim_admin_code_type,
        )?
        .map(String::from);
        errors.valid_condition(admin.code.is_none(), "Missing the claim admin code");

        if !errors.valid_condition(
            practitioner.list("name")?.is_empty(),
            "Missing practitioner `name` attribute",
        ) {
            if let Some(name) = find_usual_name(practitioner)? {
                admin.last_name = name.get_str("family")?.map(String::from);
                admin.other_names = name
                    .strings("given")?
                    .first()
                    .map(|given| given.to_string());
            }
            errors.valid_condition(admin.last_name.is_none(), "Missing practitioner family name");
        }

        admin.dob = practitioner
            .get_str("birthDate")?
            .and_then(|raw| parse_date(ctx, raw));
        for contact_point in practitioner.objects("telecom")? {
            let value = contact_point.get_str("value")?.map(String::from);
            match contact_point.get_str("system")? {
                Some(CONTACT_SYSTEM_PHONE) => admin.phone = value,
                Some(CONTACT_SYSTEM_EMAIL) => admin.email = value,
                _ => {}
            }
        }
        errors.finish(Self::RESOURCE_TYPE, admin)
    }
}

impl ReferenceConverter for PractitionerConverter {
    fn reference_id(ctx: &ConversionContext<'_>, admin: &ClaimAdmin) -> Option<String> {
        reference_id(ctx.version, admin.id, admin.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<ClaimAdmin>> {
        ctx.repository.find_claim_admin(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::FhirConfig;
    use crate::model::FhirVersion;
    use chrono::NaiveDate;

    #[test]
    fn test_round_trip() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let admin = ClaimAdmin {
            id: Some(9),
            code: Some("ADM01".to_string()),
            last_name: Some("Mwita".to_string()),
            other_names: Some("Asha".to_string()),
            dob: NaiveDate::from_ymd_opt(1980, 1, 2),
            email: Some("asha@example.org".to_string()),
            ..Default::default()
        };

        let practitioner = PractitionerConverter::to_fhir_obj(&ctx, &admin).unwrap();
        let decoded = PractitionerConverter::to_imis_obj(&ctx, &practitioner, None).unwrap();
        assert_eq!(decoded.code.as_deref(), Some("ADM01"));
        assert_eq!(decoded.last_name.as_deref(), Some("Mwita"));
        assert_eq!(decoded.other_names.as_deref(), Some("Asha"));
        assert_eq!(decoded.dob, admin.dob);
        assert_eq!(decoded.email.as_deref(), Some("asha@example.org"));
    }

    #[test]
    fn test_missing_code_and_name() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let practitioner = ctx.new_object("Practitioner").unwrap();

        let err = PractitionerConverter::to_imis_obj(&ctx, &practitioner, None).unwrap_err();
        assert_eq!(
            err.issues(),
            [
                "Missing the claim admin code".to_string(),
                "Missing practitioner `name` attribute".to_string(),
            ]
        );
    }
}
