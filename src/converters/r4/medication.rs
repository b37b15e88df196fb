//! MedicalItem ↔ Medication (R4)
//!
//! A package such as `"10 tablets"` is split into the `amount` numerator
//! (value and unit) and the `form` text. Packages not shaped like
//! `<number> <form>` are kept whole as the form.

use super::{build_unit_price_extension, find_unit_price, require_r4};
use crate::adapters::RecordKey;
use crate::converters::collector::ErrorCollector;
use crate::converters::common::{
    build_codeable_concept, build_fhir_id_identifier, build_fhir_identifier, build_fhir_pk,
    build_simple_codeable_concept, find_identifier_value, reference_id,
};
use crate::converters::{ConversionContext, FhirConverter, ReferenceConverter};
use crate::domain::{AuditUser, MedicalItem, Result};
use crate::model::FhirObject;

pub struct MedicationConverter;

impl FhirConverter for MedicationConverter {
    type Record = MedicalItem;
    const RESOURCE_TYPE: &'static str = "Medication";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, item: &MedicalItem) -> Result<FhirObject> {
        require_r4(ctx, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, code = ?item.code, "Converting medical item to Medication");
        let mut medication = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut medication, ctx.version, item.id, item.uuid)?;
        if let Some(identifier) = build_fhir_id_identifier(ctx, item.id, item.uuid)? {
            medication.append("identifier", identifier)?;
        }
        if let Some(code) = &item.code {
            medication.append(
                "identifier",
                build_fhir_identifier(ctx, code, &ctx.config.identifier.item_code_type)?,
            )?;
            medication.set(
                "code",
                build_codeable_concept(ctx, Some(code), None, item.name.as_deref())?,
            )?;
        }
        medication.set("status", ctx.config.medical.catalog_status.as_str())?;
        if let Some(package) = &item.package {
            build_fhir_package(ctx, &mut medication, package)?;
        }
        if let Some(price) = item.price {
            medication.append("extension", build_unit_price_extension(ctx, price)?)?;
        }
        Ok(medication)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        medication: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<MedicalItem> {
        require_r4(ctx, Self::RESOURCE_TYPE)?;
        ctx.expect_resource(medication, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting Medication to medical item");

        let mut errors = ErrorCollector::new();
        let default_id = ctx.config.general.default_audit_user_id;
        let mut item = MedicalItem {
            audit_user_id: Some(audit_user.map_or(default_id, |user| user.audit_id(default_id))),
            ..Default::default()
        };

        item.code = find_identifier_value(ctx, medication, &ctx.config.identifier.item_code_type)?
            .map(String::from);
        errors.valid_condition(item.code.is_none(), "Missing the item code");
        if let Some(code) = medication.get_object("code")? {
            item.name = code.get_str("text")?.map(String::from);
        }
        item.package = imis_package(medication)?;
        item.price = find_unit_price(ctx, medication)?;
        errors.finish(Self::RESOURCE_TYPE, item)
    }
}

impl ReferenceConverter for MedicationConverter {
    fn reference_id(ctx: &ConversionContext<'_>, item: &MedicalItem) -> Option<String> {
        reference_id(ctx.version, item.id, item.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<MedicalItem>> {
        ctx.repository.find_medical_item(key)
    }
}

/// `(amount, form)` of a `"<number> <form>"` package
fn split_package(package: &str) -> Option<(f64, &str)> {
    let (amount, form) = package.trim().split_once(' ')?;
    let amount = amount.parse::<f64>().ok()?;
    let form = form.trim();
    (!form.is_empty()).then_some((amount, form))
}

fn build_fhir_package(
    ctx: &ConversionContext<'_>,
    medication: &mut FhirObject,
    package: &str,
) -> Result<()> {
    let Some((amount, form)) = split_package(package) else {
        return medication.set("form", build_simple_codeable_concept(ctx, package)?);
    };
    let mut numerator = ctx.new_object("Quantity")?;
    numerator.set("value", amount)?;
    numerator.set("unit", form)?;
    let mut ratio = ctx.new_object("Ratio")?;
    ratio.set("numerator", numerator)?;
    medication.set("amount", ratio)?;
    medication.set("form", build_simple_codeable_concept(ctx, form)?)
}

fn imis_package(medication: &FhirObject) -> Result<Option<String>> {
    let form = match medication.get_object("form")? {
        Some(form) => form.get_str("text")?,
        None => None,
    };
    let amount = match medication.get_object("amount")? {
        Some(ratio) => match ratio.get_object("numerator")? {
            Some(numerator) => numerator.get_decimal("value")?,
            None => None,
        },
        None => None,
    };
    Ok(match (amount, form) {
        (Some(amount), Some(form)) => Some(format!("{amount} {form}")),
        (None, Some(form)) => Some(form.to_string()),
        _ => None,
    })
}
