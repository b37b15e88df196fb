//! Builders shared by all converters
//!
//! Identifiers, codeable concepts, contact points, addresses and names are
//! written the same way by every converter. Identifier types are always a
//! single coding under the configured identifier system, so decoding scans
//! the identifier list for a matching `(system, code)` pair.

use super::ConversionContext;
use crate::domain::Result;
use crate::model::{FhirDate, FhirObject, FhirVersion};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use uuid::Uuid;

pub const IDENTIFIER_USE_USUAL: &str = "usual";
pub const NAME_USE_USUAL: &str = "usual";

pub const CONTACT_SYSTEM_PHONE: &str = "phone";
pub const CONTACT_SYSTEM_FAX: &str = "fax";
pub const CONTACT_SYSTEM_EMAIL: &str = "email";
pub const CONTACT_USE_HOME: &str = "home";

pub const ADDRESS_USE_HOME: &str = "home";
pub const ADDRESS_TYPE_PHYSICAL: &str = "physical";
pub const ADDRESS_TYPE_BOTH: &str = "both";

/// Reference id of a record: the database id in STU3, the uuid in R4
pub fn reference_id(version: FhirVersion, id: Option<i64>, uuid: Option<Uuid>) -> Option<String> {
    match version {
        FhirVersion::Stu3 => id.map(|id| id.to_string()),
        FhirVersion::R4 => uuid.map(|uuid| uuid.to_string()),
    }
}

/// Sets the resource `id` from the record's reference id
pub fn build_fhir_pk(
    resource: &mut FhirObject,
    version: FhirVersion,
    id: Option<i64>,
    uuid: Option<Uuid>,
) -> Result<()> {
    resource.set_opt("id", reference_id(version, id, uuid))
}

/// CodeableConcept with one coding when `code` is present
pub fn build_codeable_concept(
    ctx: &ConversionContext<'_>,
    code: Option<&str>,
    system: Option<&str>,
    text: Option<&str>,
) -> Result<FhirObject> {
    let mut concept = ctx.new_object("CodeableConcept")?;
    if let Some(code) = code {
        let mut coding = ctx.new_object("Coding")?;
        coding.set_opt("system", system)?;
        coding.set("code", code)?;
        concept.append("coding", coding)?;
    }
    concept.set_opt("text", text)?;
    Ok(concept)
}

/// CodeableConcept carrying only a text
pub fn build_simple_codeable_concept(
    ctx: &ConversionContext<'_>,
    text: &str,
) -> Result<FhirObject> {
    build_codeable_concept(ctx, None, None, Some(text))
}

/// First coding of a CodeableConcept
pub fn first_coding(concept: &FhirObject) -> Result<Option<&FhirObject>> {
    Ok(concept.objects("coding")?.into_iter().next())
}

/// Code of the first coding under `system`
pub fn coding_code<'a>(concept: &'a FhirObject, system: &str) -> Result<Option<&'a str>> {
    for coding in concept.objects("coding")? {
        if coding.get_str("system")? == Some(system) {
            if let Some(code) = coding.get_str("code")? {
                return Ok(Some(code));
            }
        }
    }
    Ok(None)
}

/// Identifier typed by `type_code` under the configured identifier system
pub fn build_fhir_identifier(
    ctx: &ConversionContext<'_>,
    value: &str,
    type_code: &str,
) -> Result<FhirObject> {
    let mut identifier = ctx.new_object("Identifier")?;
    identifier.set("use", IDENTIFIER_USE_USUAL)?;
    let identifier_type = build_codeable_concept(
        ctx,
        Some(type_code),
        Some(ctx.config.identifier.system.as_str()),
        None,
    )?;
    identifier.set("type", identifier_type)?;
    identifier.set("value", value)?;
    Ok(identifier)
}

/// Internal id identifier: database id in STU3, uuid in R4
pub fn build_fhir_id_identifier(
    ctx: &ConversionContext<'_>,
    id: Option<i64>,
    uuid: Option<Uuid>,
) -> Result<Option<FhirObject>> {
    let codes = &ctx.config.identifier;
    match ctx.version {
        FhirVersion::Stu3 => id
            .map(|id| build_fhir_identifier(ctx, &id.to_string(), &codes.id_type_code))
            .transpose(),
        FhirVersion::R4 => uuid
            .map(|uuid| build_fhir_identifier(ctx, &uuid.to_string(), &codes.uuid_type_code))
            .transpose(),
    }
}

/// Value of the identifier typed by `type_code`
///
/// Only the first coding of each identifier type is inspected.
pub fn find_identifier_value<'a>(
    ctx: &ConversionContext<'_>,
    resource: &'a FhirObject,
    type_code: &str,
) -> Result<Option<&'a str>> {
    for identifier in resource.objects("identifier")? {
        let Some(identifier_type) = identifier.get_object("type")? else {
            continue;
        };
        let Some(coding) = first_coding(identifier_type)? else {
            continue;
        };
        if coding.get_str("system")? == Some(ctx.config.identifier.system.as_str())
            && coding.get_str("code")? == Some(type_code)
        {
            if let Some(value) = identifier.get_str("value")? {
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}

/// ContactPoint with a system, value and use
pub fn build_fhir_contact_point(
    ctx: &ConversionContext<'_>,
    value: &str,
    system: &str,
    contact_use: &str,
) -> Result<FhirObject> {
    let mut contact_point = ctx.new_object("ContactPoint")?;
    contact_point.set("system", system)?;
    contact_point.set("value", value)?;
    contact_point.set("use", contact_use)?;
    Ok(contact_point)
}

/// Address holding only a text
pub fn build_fhir_address(
    ctx: &ConversionContext<'_>,
    text: &str,
    address_use: &str,
    address_type: &str,
) -> Result<FhirObject> {
    let mut address = ctx.new_object("Address")?;
    address.set("use", address_use)?;
    address.set("type", address_type)?;
    address.set("text", text)?;
    Ok(address)
}

/// Usual HumanName, or `None` when both parts are absent
pub fn build_fhir_name(
    ctx: &ConversionContext<'_>,
    family: Option<&str>,
    given: Option<&str>,
) -> Result<Option<FhirObject>> {
    if family.is_none() && given.is_none() {
        return Ok(None);
    }
    let mut name = ctx.new_object("HumanName")?;
    name.set("use", NAME_USE_USUAL)?;
    name.set_opt("family", family)?;
    if let Some(given) = given {
        name.append("given", given)?;
    }
    Ok(Some(name))
}

/// First name whose use is `usual`
pub fn find_usual_name(resource: &FhirObject) -> Result<Option<&FhirObject>> {
    for name in resource.objects("name")? {
        if name.get_str("use")? == Some(NAME_USE_USUAL) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

/// Money with an optional currency
pub fn build_money(
    ctx: &ConversionContext<'_>,
    value: f64,
    currency: Option<&str>,
) -> Result<FhirObject> {
    let mut money = ctx.new_object("Money")?;
    money.set("value", value)?;
    money.set_opt("currency", currency)?;
    Ok(money)
}

/// Date literal in the configured date format
pub fn format_date(ctx: &ConversionContext<'_>, date: NaiveDate) -> Result<FhirDate> {
    FhirDate::from_date(date, &ctx.config.general.iso_date_format)
}

/// Parses a FHIR date or dateTime, keeping the calendar date
///
/// Tries the configured date format, then the configured dateTime format,
/// then RFC 3339 (dateTime with offset).
pub fn parse_date(ctx: &ConversionContext<'_>, raw: &str) -> Option<NaiveDate> {
    let general = &ctx.config.general;
    NaiveDate::parse_from_str(raw, &general.iso_date_format)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, &general.iso_datetime_format)
                .ok()
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}
