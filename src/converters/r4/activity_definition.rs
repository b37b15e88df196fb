//! Service ↔ ActivityDefinition (R4)
//!
//! The service code is both the `name` and a typed identifier, the service
//! name is the `title`. Who the service applies to travels as `useContext`
//! entries under the configured usage context system:
//!
//! - `gender`: one coding per gender letter (`M`, `F`)
//! - `age`: one coding per age letter (`A`, `K`)
//! - `workflow`: the service category as text
//! - `venue`: the care type as text
//!
//! The service type is the only `topic` and the price is a unit price
//! extension.

use super::{build_unit_price_extension, find_unit_price, require_r4};
use crate::adapters::RecordKey;
use crate::converters::collector::ErrorCollector;
use crate::converters::common::{
    build_codeable_concept, build_fhir_id_identifier, build_fhir_identifier, build_fhir_pk,
    build_simple_codeable_concept, find_identifier_value, format_date, parse_date, reference_id,
};
use crate::converters::{ConversionContext, FhirConverter, ReferenceConverter};
use crate::domain::medical::{
    patient_category_bit, patient_category_letters, PATIENT_AGE_FLAGS, PATIENT_GENDER_FLAGS,
};
use crate::domain::{AuditUser, Result, Service};
use crate::model::FhirObject;

pub const CONTEXT_GENDER: &str = "gender";
pub const CONTEXT_AGE: &str = "age";
pub const CONTEXT_WORKFLOW: &str = "workflow";
pub const CONTEXT_VENUE: &str = "venue";

pub struct ActivityDefinitionConverter;

impl FhirConverter for ActivityDefinitionConverter {
    type Record = Service;
    const RESOURCE_TYPE: &'static str = "ActivityDefinition";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, service: &Service) -> Result<FhirObject> {
        require_r4(ctx, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, code = ?service.code, "Converting service to ActivityDefinition");
        let mut definition = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut definition, ctx.version, service.id, service.uuid)?;
        build_fhir_identifiers(ctx, &mut definition, service)?;
        definition.set("status", ctx.config.medical.catalog_status.as_str())?;
        if let Some(validity_from) = service.validity_from {
            definition.set("date", format_date(ctx, validity_from)?)?;
        }
        definition.set_opt("name", service.code.as_deref())?;
        definition.set_opt("title", service.name.as_deref())?;
        build_fhir_use_context(ctx, &mut definition, service)?;
        if let Some(service_type) = &service.service_type {
            definition.append("topic", build_simple_codeable_concept(ctx, service_type)?)?;
        }
        if let Some(code) = &service.code {
            definition.set(
                "code",
                build_codeable_concept(ctx, Some(code), None, service.name.as_deref())?,
            )?;
        }
        if let Some(price) = service.price {
            definition.append("extension", build_unit_price_extension(ctx, price)?)?;
        }
        Ok(definition)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        definition: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<Service> {
        require_r4(ctx, Self::RESOURCE_TYPE)?;
        ctx.expect_resource(definition, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting ActivityDefinition to service");

        let mut errors = ErrorCollector::new();
        let default_id = ctx.config.general.default_audit_user_id;
        let mut service = Service {
            audit_user_id: Some(audit_user.map_or(default_id, |user| user.audit_id(default_id))),
            ..Default::default()
        };

        let code = find_identifier_value(ctx, definition, &ctx.config.identifier.service_code_type)?;
        service.code = code.or(definition.get_str("name")?).map(String::from);
        errors.valid_condition(service.code.is_none(), "Missing the service code");

        service.validity_from = definition
            .get_str("date")?
            .and_then(|raw| parse_date(ctx, raw));
        errors.valid_condition(
            service.validity_from.is_none(),
            "Missing activity definition `validity from` attribute",
        );

        service.name = definition.get_str("title")?.map(String::from);
        errors.valid_condition(
            service.name.is_none(),
            "Missing activity definition `serv name` attribute",
        );

        service.service_type = match definition.objects("topic")?.first() {
            Some(topic) => topic.get_str("text")?.map(String::from),
            None => None,
        };
        errors.valid_condition(
            service.service_type.is_none(),
            "Missing activity definition `serv type` attribute",
        );

        service.patient_category = Some(imis_patient_category(ctx, definition)?);

        service.category = usage_context_text(ctx, definition, CONTEXT_WORKFLOW)?;
        errors.valid_condition(
            service.category.is_none(),
            "Missing activity definition `serv category` attribute",
        );
        service.care_type = usage_context_text(ctx, definition, CONTEXT_VENUE)?;
        errors.valid_condition(
            service.care_type.is_none(),
            "Missing activity definition `serv care type` attribute",
        );

        service.price = find_unit_price(ctx, definition)?;
        errors.finish(Self::RESOURCE_TYPE, service)
    }
}

impl ReferenceConverter for ActivityDefinitionConverter {
    fn reference_id(ctx: &ConversionContext<'_>, service: &Service) -> Option<String> {
        reference_id(ctx.version, service.id, service.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<Service>> {
        ctx.repository.find_service(key)
    }
}

fn build_fhir_identifiers(
    ctx: &ConversionContext<'_>,
    definition: &mut FhirObject,
    service: &Service,
) -> Result<()> {
    if let Some(identifier) = build_fhir_id_identifier(ctx, service.id, service.uuid)? {
        definition.append("identifier", identifier)?;
    }
    if let Some(code) = &service.code {
        definition.append(
            "identifier",
            build_fhir_identifier(ctx, code, &ctx.config.identifier.service_code_type)?,
        )?;
    }
    Ok(())
}

fn build_usage_context(
    ctx: &ConversionContext<'_>,
    code: &str,
    value: FhirObject,
) -> Result<FhirObject> {
    let mut coding = ctx.new_object("Coding")?;
    coding.set("system", ctx.config.medical.usage_context_system.as_str())?;
    coding.set("code", code)?;
    let mut context = ctx.new_object("UsageContext")?;
    context.set("code", coding)?;
    context.set("valueCodeableConcept", value)?;
    Ok(context)
}

/// CodeableConcept with one system-less coding per letter, `None` without letters
fn letters_concept(ctx: &ConversionContext<'_>, letters: &[&str]) -> Result<Option<FhirObject>> {
    if letters.is_empty() {
        return Ok(None);
    }
    let mut concept = ctx.new_object("CodeableConcept")?;
    for letter in letters {
        let mut coding = ctx.new_object("Coding")?;
        coding.set("code", *letter)?;
        concept.append("coding", coding)?;
    }
    Ok(Some(concept))
}

fn build_fhir_use_context(
    ctx: &ConversionContext<'_>,
    definition: &mut FhirObject,
    service: &Service,
) -> Result<()> {
    let category = service.patient_category.unwrap_or_default();
    let flagged = [
        (CONTEXT_GENDER, patient_category_letters(category, &PATIENT_GENDER_FLAGS)),
        (CONTEXT_AGE, patient_category_letters(category, &PATIENT_AGE_FLAGS)),
    ];
    for (code, letters) in flagged {
        if let Some(concept) = letters_concept(ctx, &letters)? {
            definition.append("useContext", build_usage_context(ctx, code, concept)?)?;
        }
    }
    let described = [
        (CONTEXT_WORKFLOW, service.category.as_deref()),
        (CONTEXT_VENUE, service.care_type.as_deref()),
    ];
    for (code, text) in described {
        if let Some(text) = text {
            let concept = build_simple_codeable_concept(ctx, text)?;
            definition.append("useContext", build_usage_context(ctx, code, concept)?)?;
        }
    }
    Ok(())
}

/// Value of the usage context coded `code` under the configured system
fn find_usage_context<'a>(
    ctx: &ConversionContext<'_>,
    definition: &'a FhirObject,
    code: &str,
) -> Result<Option<&'a FhirObject>> {
    let system = ctx.config.medical.usage_context_system.as_str();
    for context in definition.objects("useContext")? {
        let Some(coding) = context.get_object("code")? else {
            continue;
        };
        if coding.get_str("system")? == Some(system) && coding.get_str("code")? == Some(code) {
            return context.get_object("valueCodeableConcept");
        }
    }
    Ok(None)
}

fn usage_context_text(
    ctx: &ConversionContext<'_>,
    definition: &FhirObject,
    code: &str,
) -> Result<Option<String>> {
    Ok(match find_usage_context(ctx, definition, code)? {
        Some(concept) => concept.get_str("text")?.map(String::from),
        None => None,
    })
}

/// Sum of the bits of every letter coded in the gender and age contexts
///
/// Unknown letters are ignored; no context at all means category 0.
fn imis_patient_category(ctx: &ConversionContext<'_>, definition: &FhirObject) -> Result<i32> {
    let mut category = 0;
    for code in [CONTEXT_GENDER, CONTEXT_AGE] {
        let Some(concept) = find_usage_context(ctx, definition, code)? else {
            continue;
        };
        for coding in concept.objects("coding")? {
            if let Some(bit) = coding.get_str("code")?.and_then(patient_category_bit) {
                category |= bit;
            }
        }
    }
    Ok(category)
}
