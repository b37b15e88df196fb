//! Insuree ↔ Patient

use super::collector::ErrorCollector;
use super::common::{
    build_codeable_concept, build_fhir_address, build_fhir_contact_point, build_fhir_id_identifier,
    build_fhir_identifier, build_fhir_name, build_fhir_pk, coding_code, find_identifier_value,
    find_usual_name, format_date, parse_date, reference_id, ADDRESS_TYPE_BOTH,
    ADDRESS_TYPE_PHYSICAL, ADDRESS_USE_HOME, CONTACT_SYSTEM_EMAIL, CONTACT_SYSTEM_PHONE,
    CONTACT_USE_HOME,
};
use super::{ConversionContext, FhirConverter, ReferenceConverter};
use crate::adapters::RecordKey;
use crate::config::{FhirConfig, GenderCodes, MaritalConfig};
use crate::domain::{AuditUser, FhirError, Insuree, Result};
use crate::model::FhirObject;

pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";
pub const GENDER_OTHER: &str = "other";
pub const GENDER_UNKNOWN: &str = "unknown";

pub struct PatientConverter;

impl FhirConverter for PatientConverter {
    type Record = Insuree;
    const RESOURCE_TYPE: &'static str = "Patient";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, insuree: &Insuree) -> Result<FhirObject> {
        tracing::debug!(version = %ctx.version, id = ?insuree.id, "Converting insuree to Patient");
        let mut patient = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut patient, ctx.version, insuree.id, insuree.uuid)?;
        build_fhir_identifiers(ctx, &mut patient, insuree)?;
        if let Some(name) = build_fhir_name(
            ctx,
            insuree.last_name.as_deref(),
            insuree.other_names.as_deref(),
        )? {
            patient.append("name", name)?;
        }
        if let Some(dob) = insuree.dob {
            patient.set("birthDate", format_date(ctx, dob)?)?;
        }
        patient.set_opt(
            "gender",
            fhir_gender(&ctx.config.general.gender_codes, insuree.gender.as_deref()),
        )?;
        build_fhir_marital_status(ctx, &mut patient, insuree)?;
        build_fhir_telecom(ctx, &mut patient, insuree)?;
        build_fhir_addresses(ctx, &mut patient, insuree)?;
        Ok(patient)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        patient: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<Insuree> {
        let audit_user = audit_user.ok_or(FhirError::NotAuthenticated)?;
        ctx.expect_resource(patient, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, user = %audit_user.username, "Converting Patient to insuree");

        let mut errors = ErrorCollector::new();
        let mut insuree = default_insuree(ctx.config, audit_user);
        build_imis_names(&mut insuree, patient, &mut errors)?;
        build_imis_identifiers(ctx, &mut insuree, patient)?;
        build_imis_birth_date(ctx, &mut insuree, patient, &mut errors)?;
        insuree.gender = patient
            .get_str("gender")?
            .and_then(|gender| imis_gender(&ctx.config.general.gender_codes, gender));
        build_imis_marital(ctx, &mut insuree, patient)?;
        build_imis_contacts(&mut insuree, patient)?;
        build_imis_addresses(&mut insuree, patient)?;
        errors.finish(Self::RESOURCE_TYPE, insuree)
    }
}

impl ReferenceConverter for PatientConverter {
    fn reference_id(ctx: &ConversionContext<'_>, insuree: &Insuree) -> Option<String> {
        reference_id(ctx.version, insuree.id, insuree.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<Insuree>> {
        ctx.repository.find_insuree(key)
    }
}

fn default_insuree(config: &FhirConfig, audit_user: &AuditUser) -> Insuree {
    Insuree {
        head: config.general.default_patient_head,
        card_issued: config.general.default_patient_card_issued,
        validity_from: Some(chrono::Utc::now().naive_utc()),
        audit_user_id: Some(audit_user.audit_id(config.general.default_audit_user_id)),
        ..Default::default()
    }
}

fn build_fhir_identifiers(
    ctx: &ConversionContext<'_>,
    patient: &mut FhirObject,
    insuree: &Insuree,
) -> Result<()> {
    let codes = &ctx.config.identifier;
    if let Some(identifier) = build_fhir_id_identifier(ctx, insuree.id, insuree.uuid)? {
        patient.append("identifier", identifier)?;
    }
    if let Some(chf_id) = &insuree.chf_id {
        patient.append(
            "identifier",
            build_fhir_identifier(ctx, chf_id, &codes.chfid_type_code)?,
        )?;
    }
    if let Some(passport) = &insuree.passport {
        patient.append(
            "identifier",
            build_fhir_identifier(ctx, passport, &codes.passport_type_code)?,
        )?;
    }
    Ok(())
}

fn build_imis_identifiers(
    ctx: &ConversionContext<'_>,
    insuree: &mut Insuree,
    patient: &FhirObject,
) -> Result<()> {
    let codes = &ctx.config.identifier;
    insuree.chf_id = find_identifier_value(ctx, patient, &codes.chfid_type_code)?.map(String::from);
    insuree.passport =
        find_identifier_value(ctx, patient, &codes.passport_type_code)?.map(String::from);
    Ok(())
}

fn build_imis_names(
    insuree: &mut Insuree,
    patient: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    if !errors.valid_condition(
        patient.list("name")?.is_empty(),
        "Missing patient `name` attribute",
    ) {
        if let Some(name) = find_usual_name(patient)? {
            insuree.last_name = name.get_str("family")?.map(String::from);
            insuree.other_names = name.strings("given")?.first().map(|given| given.to_string());
        }
    }
    errors.valid_condition(insuree.last_name.is_none(), "Missing patient family name");
    errors.valid_condition(insuree.other_names.is_none(), "Missing patient given name");
    Ok(())
}

fn build_imis_birth_date(
    ctx: &ConversionContext<'_>,
    insuree: &mut Insuree,
    patient: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let birth_date = patient.get_str("birthDate")?;
    if !errors.valid_condition(
        birth_date.is_none(),
        "Missing patient `birthDate` attribute",
    ) {
        if let Some(raw) = birth_date {
            insuree.dob = parse_date(ctx, raw);
            errors.valid_condition(
                insuree.dob.is_none(),
                format!("Invalid patient `birthDate` attribute: {raw}"),
            );
        }
    }
    Ok(())
}

/// FHIR administrative gender of a domain gender code
///
/// A record without gender is `unknown`; an unmapped code leaves the field unset.
pub fn fhir_gender(codes: &GenderCodes, gender: Option<&str>) -> Option<&'static str> {
    match gender {
        None => Some(GENDER_UNKNOWN),
        Some(code) if code == codes.male => Some(GENDER_MALE),
        Some(code) if code == codes.female => Some(GENDER_FEMALE),
        Some(code) if code == codes.other => Some(GENDER_OTHER),
        Some(_) => None,
    }
}

/// Domain gender code of a FHIR administrative gender
pub fn imis_gender(codes: &GenderCodes, gender: &str) -> Option<String> {
    match gender {
        GENDER_MALE => Some(codes.male.clone()),
        GENDER_FEMALE => Some(codes.female.clone()),
        GENDER_OTHER => Some(codes.other.clone()),
        _ => None,
    }
}

/// Configured marital status code of a domain marital letter
pub fn fhir_marital_code<'a>(marital: &'a MaritalConfig, code: &str) -> Option<&'a str> {
    let mapped = match code {
        "M" => &marital.married,
        "S" => &marital.never_married,
        "D" => &marital.divorced,
        "W" => &marital.widowed,
        "N" => &marital.unknown,
        _ => return None,
    };
    Some(mapped.as_str())
}

/// Domain marital letter of a configured marital status code
pub fn imis_marital_code(marital: &MaritalConfig, code: &str) -> Option<&'static str> {
    [
        (&marital.married, "M"),
        (&marital.never_married, "S"),
        (&marital.divorced, "D"),
        (&marital.widowed, "W"),
        (&marital.unknown, "N"),
    ]
    .into_iter()
    .find(|(configured, _)| configured.as_str() == code)
    .map(|(_, letter)| letter)
}

fn build_fhir_marital_status(
    ctx: &ConversionContext<'_>,
    patient: &mut FhirObject,
    insuree: &Insuree,
) -> Result<()> {
    let marital = &ctx.config.marital;
    let Some(code) = insuree
        .marital
        .as_deref()
        .and_then(|letter| fhir_marital_code(marital, letter))
    else {
        return Ok(());
    };
    let status = build_codeable_concept(ctx, Some(code), Some(marital.system.as_str()), None)?;
    patient.set("maritalStatus", status)
}

fn build_imis_marital(
    ctx: &ConversionContext<'_>,
    insuree: &mut Insuree,
    patient: &FhirObject,
) -> Result<()> {
    let marital = &ctx.config.marital;
    if let Some(status) = patient.get_object("maritalStatus")? {
        insuree.marital = coding_code(status, &marital.system)?
            .and_then(|code| imis_marital_code(marital, code))
            .map(String::from);
    }
    Ok(())
}

fn build_fhir_telecom(
    ctx: &ConversionContext<'_>,
    patient: &mut FhirObject,
    insuree: &Insuree,
) -> Result<()> {
    if let Some(phone) = &insuree.phone {
        patient.append(
            "telecom",
            build_fhir_contact_point(ctx, phone, CONTACT_SYSTEM_PHONE, CONTACT_USE_HOME)?,
        )?;
    }
    if let Some(email) = &insuree.email {
        patient.append(
            "telecom",
            build_fhir_contact_point(ctx, email, CONTACT_SYSTEM_EMAIL, CONTACT_USE_HOME)?,
        )?;
    }
    Ok(())
}

fn build_imis_contacts(insuree: &mut Insuree, patient: &FhirObject) -> Result<()> {
    for contact_point in patient.objects("telecom")? {
        let value = contact_point.get_str("value")?.map(String::from);
        match contact_point.get_str("system")? {
            Some(CONTACT_SYSTEM_PHONE) => insuree.phone = value,
            Some(CONTACT_SYSTEM_EMAIL) => insuree.email = value,
            _ => {}
        }
    }
    Ok(())
}

fn build_fhir_addresses(
    ctx: &ConversionContext<'_>,
    patient: &mut FhirObject,
    insuree: &Insuree,
) -> Result<()> {
    if let Some(current) = &insuree.current_address {
        patient.append(
            "address",
            build_fhir_address(ctx, current, ADDRESS_USE_HOME, ADDRESS_TYPE_PHYSICAL)?,
        )?;
    }
    if let Some(geolocation) = &insuree.geolocation {
        patient.append(
            "address",
            build_fhir_address(ctx, geolocation, ADDRESS_USE_HOME, ADDRESS_TYPE_BOTH)?,
        )?;
    }
    Ok(())
}

fn build_imis_addresses(insuree: &mut Insuree, patient: &FhirObject) -> Result<()> {
    for address in patient.objects("address")? {
        let text = address.get_str("text")?.map(String::from);
        match address.get_str("type")? {
            Some(ADDRESS_TYPE_PHYSICAL) => insuree.current_address = text,
            Some(ADDRESS_TYPE_BOTH) => insuree.geolocation = text,
            _ => {}
        }
    }
    Ok(())
}
