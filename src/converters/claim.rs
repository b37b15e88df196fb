//! Claim ↔ Claim
//!
//! Besides the header fields a claim carries its diagnoses (one entry per
//! filled ICD slot, tagged with the slot name), the guarantee id and
//! explanation as `information` entries, and one `item` per claimed medical
//! item or service. The item's category text tells items and services apart.

use super::collector::ErrorCollector;
use super::common::{
    build_codeable_concept, build_fhir_id_identifier, build_fhir_identifier, build_fhir_pk,
    build_money, build_simple_codeable_concept, find_identifier_value, first_coding, format_date,
    parse_date, reference_id,
};
use super::{
    ConversionContext, FhirConverter, LocationConverter, PatientConverter, PractitionerConverter,
    ReferenceConverter,
};
use crate::adapters::RecordKey;
use crate::domain::{AuditUser, Claim, ClaimItem, ClaimService, DiagnosisSlot, Result};
use crate::model::{FhirObject, FhirVersion};

pub struct ClaimConverter;

impl FhirConverter for ClaimConverter {
    type Record = Claim;
    const RESOURCE_TYPE: &'static str = "Claim";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, claim: &Claim) -> Result<FhirObject> {
        tracing::debug!(version = %ctx.version, code = ?claim.code, "Converting claim to Claim");
        let mut fhir_claim = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut fhir_claim, ctx.version, claim.id, claim.uuid)?;
        if let Some(date_claimed) = claim.date_claimed {
            fhir_claim.set("created", format_date(ctx, date_claimed)?)?;
        }
        if let Some(facility) = &claim.health_facility {
            let reference = LocationConverter::build_fhir_resource_reference(ctx, facility)?;
            if !reference.is_empty() {
                fhir_claim.set("facility", reference)?;
            }
        }
        build_fhir_identifiers(ctx, &mut fhir_claim, claim)?;
        if let Some(insuree) = &claim.insuree {
            let reference = PatientConverter::build_fhir_resource_reference(ctx, insuree)?;
            if !reference.is_empty() {
                fhir_claim.set("patient", reference)?;
            }
        }
        build_fhir_billable_period(ctx, &mut fhir_claim, claim)?;
        build_fhir_diagnoses(ctx, &mut fhir_claim, claim)?;
        fhir_claim.set(
            "total",
            build_money(
                ctx,
                claim.claimed.unwrap_or_default(),
                Some(ctx.config.general.currency.as_str()),
            )?,
        )?;
        if let Some(admin) = &claim.admin {
            let reference = PractitionerConverter::build_fhir_resource_reference(ctx, admin)?;
            if !reference.is_empty() {
                fhir_claim.set("enterer", reference)?;
            }
        }
        build_fhir_information(ctx, &mut fhir_claim, claim)?;
        if let Some(visit_type) = &claim.visit_type {
            fhir_claim.set("type", build_simple_codeable_concept(ctx, visit_type)?)?;
        }
        build_fhir_items(ctx, &mut fhir_claim, claim)?;
        Ok(fhir_claim)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        fhir_claim: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<Claim> {
        ctx.expect_resource(fhir_claim, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting Claim to claim");

        let mut errors = ErrorCollector::new();
        let default_id = ctx.config.general.default_audit_user_id;
        let mut claim = Claim {
            audit_user_id: Some(audit_user.map_or(default_id, |user| user.audit_id(default_id))),
            ..Default::default()
        };

        claim.date_claimed = fhir_claim
            .get_str("created")?
            .and_then(|raw| parse_date(ctx, raw));
        errors.valid_condition(claim.date_claimed.is_none(), "Missing the date of creation");

        if let Some(reference) = fhir_claim.get_object("facility")? {
            claim.health_facility = LocationConverter::get_imis_obj_by_fhir_reference(ctx, reference)?;
        }
        errors.valid_condition(
            claim.health_facility.is_none(),
            "Missing the facility reference",
        );

        claim.code = find_identifier_value(ctx, fhir_claim, &ctx.config.identifier.claim_code_type)?
            .map(String::from);
        errors.valid_condition(claim.code.is_none(), "Missing the claim code");

        if let Some(reference) = fhir_claim.get_object("patient")? {
            claim.insuree = PatientConverter::get_imis_obj_by_fhir_reference(ctx, reference)?;
        }
        errors.valid_condition(claim.insuree.is_none(), "Missing the patient reference");

        build_imis_date_range(ctx, &mut claim, fhir_claim, &mut errors)?;
        build_imis_diagnoses(ctx, &mut claim, fhir_claim, &mut errors)?;

        if let Some(total) = fhir_claim.get_object("total")? {
            claim.claimed = total.get_decimal("value")?;
        }
        errors.valid_condition(
            claim.claimed.is_none(),
            "Missing the value for `total` attribute",
        );

        if let Some(reference) = fhir_claim.get_object("enterer")? {
            claim.admin = PractitionerConverter::get_imis_obj_by_fhir_reference(ctx, reference)?;
        }
        errors.valid_condition(claim.admin.is_none(), "Missing the enterer reference");

        build_imis_information(ctx, &mut claim, fhir_claim)?;
        if let Some(claim_type) = fhir_claim.get_object("type")? {
            claim.visit_type = claim_type.get_str("text")?.map(String::from);
        }
        build_imis_items(ctx, &mut claim, fhir_claim, &mut errors)?;
        errors.finish(Self::RESOURCE_TYPE, claim)
    }
}

impl ReferenceConverter for ClaimConverter {
    fn reference_id(ctx: &ConversionContext<'_>, claim: &Claim) -> Option<String> {
        reference_id(ctx.version, claim.id, claim.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<Claim>> {
        ctx.repository.find_claim(key)
    }
}

/// Name of the item property holding the item or service code
fn item_code_property(version: FhirVersion) -> &'static str {
    match version {
        FhirVersion::Stu3 => "service",
        FhirVersion::R4 => "productOrService",
    }
}

/// Internal id identifier followed by the claim code
pub(crate) fn build_fhir_identifiers(
    ctx: &ConversionContext<'_>,
    resource: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    if let Some(identifier) = build_fhir_id_identifier(ctx, claim.id, claim.uuid)? {
        resource.append("identifier", identifier)?;
    }
    if let Some(code) = &claim.code {
        resource.append(
            "identifier",
            build_fhir_identifier(ctx, code, &ctx.config.identifier.claim_code_type)?,
        )?;
    }
    Ok(())
}

fn build_fhir_billable_period(
    ctx: &ConversionContext<'_>,
    fhir_claim: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let mut period = ctx.new_object("Period")?;
    if let Some(date_from) = claim.date_from {
        period.set("start", format_date(ctx, date_from)?)?;
    }
    if let Some(date_to) = claim.date_to {
        period.set("end", format_date(ctx, date_to)?)?;
    }
    fhir_claim.set("billablePeriod", period)
}

fn build_imis_date_range(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    fhir_claim: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    if let Some(period) = fhir_claim.get_object("billablePeriod")? {
        claim.date_from = period.get_str("start")?.and_then(|raw| parse_date(ctx, raw));
        claim.date_to = period.get_str("end")?.and_then(|raw| parse_date(ctx, raw));
    }
    errors.valid_condition(claim.date_from.is_none(), "Missing the billable start date");
    Ok(())
}

fn build_fhir_diagnoses(
    ctx: &ConversionContext<'_>,
    fhir_claim: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let mut sequence = 0i64;
    for (slot, code) in claim.diagnosis_slots() {
        let Some(code) = code else {
            continue;
        };
        sequence += 1;
        let mut diagnosis = ctx.new_object("ClaimDiagnosis")?;
        diagnosis.set("sequence", sequence)?;
        diagnosis.set(
            "diagnosisCodeableConcept",
            build_codeable_concept(ctx, Some(code.code.as_str()), None, code.name.as_deref())?,
        )?;
        diagnosis.append("type", build_simple_codeable_concept(ctx, slot.as_tag())?)?;
        fhir_claim.append("diagnosis", diagnosis)?;
    }
    Ok(())
}

fn build_imis_diagnoses(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    fhir_claim: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    for diagnosis in fhir_claim.objects("diagnosis")? {
        let slot = match diagnosis.objects("type")?.first() {
            Some(tag) => tag.get_str("text")?.and_then(DiagnosisSlot::from_tag),
            None => None,
        };
        let Some(slot) = slot else {
            continue;
        };
        let code = match diagnosis.get_object("diagnosisCodeableConcept")? {
            Some(concept) => first_coding(concept)?
                .map(|coding| coding.get_str("code"))
                .transpose()?
                .flatten(),
            None => None,
        };
        let Some(code) = code else {
            continue;
        };
        match ctx.repository.find_diagnosis(code)? {
            Some(found) => claim.set_diagnosis(slot, found),
            None => errors.push(format!("Could not find diagnosis code {code}")),
        }
    }
    errors.valid_condition(claim.icd.is_none(), "Missing the main diagnosis for claim");
    Ok(())
}

fn build_fhir_information(
    ctx: &ConversionContext<'_>,
    fhir_claim: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let codes = &ctx.config.claim;
    let entries = [
        (&codes.guarantee_id_code, &claim.guarantee_id),
        (&codes.explanation_code, &claim.explanation),
    ];
    let mut sequence = 0i64;
    for (category, value) in entries {
        let Some(value) = value else {
            continue;
        };
        sequence += 1;
        let mut information = ctx.new_object("ClaimInformation")?;
        information.set("sequence", sequence)?;
        information.set("category", build_simple_codeable_concept(ctx, category)?)?;
        information.set("valueString", value.as_str())?;
        fhir_claim.append("information", information)?;
    }
    Ok(())
}

fn build_imis_information(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    fhir_claim: &FhirObject,
) -> Result<()> {
    let codes = &ctx.config.claim;
    for information in fhir_claim.objects("information")? {
        let category = match information.get_object("category")? {
            Some(concept) => concept.get_str("text")?,
            None => None,
        };
        let value = information.get_str("valueString")?.map(String::from);
        match category {
            Some(category) if category == codes.guarantee_id_code => claim.guarantee_id = value,
            Some(category) if category == codes.explanation_code => claim.explanation = value,
            _ => {}
        }
    }
    Ok(())
}

fn build_fhir_item(
    ctx: &ConversionContext<'_>,
    sequence: i64,
    category: &str,
    code: &str,
    quantity: Option<f64>,
    price: Option<f64>,
) -> Result<FhirObject> {
    let mut item = ctx.new_object("ClaimItem")?;
    item.set("sequence", sequence)?;
    item.set("category", build_simple_codeable_concept(ctx, category)?)?;
    item.set(
        item_code_property(ctx.version),
        build_simple_codeable_concept(ctx, code)?,
    )?;
    if let Some(quantity) = quantity {
        let mut fhir_quantity = ctx.new_object("Quantity")?;
        fhir_quantity.set("value", quantity)?;
        item.set("quantity", fhir_quantity)?;
    }
    if let Some(price) = price {
        item.set(
            "unitPrice",
            build_money(ctx, price, Some(ctx.config.general.currency.as_str()))?,
        )?;
    }
    Ok(item)
}

/// Claimed items first, then services, numbered from 1
pub(crate) fn build_fhir_items(
    ctx: &ConversionContext<'_>,
    resource: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let codes = &ctx.config.claim;
    let mut sequence = 0i64;
    for item in &claim.items {
        sequence += 1;
        resource.append(
            "item",
            build_fhir_item(
                ctx,
                sequence,
                &codes.item_code,
                &item.code,
                item.qty_provided,
                item.price_asked,
            )?,
        )?;
    }
    for service in &claim.services {
        sequence += 1;
        resource.append(
            "item",
            build_fhir_item(
                ctx,
                sequence,
                &codes.service_code,
                &service.code,
                service.qty_provided,
                service.price_asked,
            )?,
        )?;
    }
    Ok(())
}

fn build_imis_items(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    fhir_claim: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let codes = &ctx.config.claim;
    for item in fhir_claim.objects("item")? {
        let sequence = item.get_integer("sequence")?.unwrap_or_default();
        let category = match item.get_object("category")? {
            Some(concept) => concept.get_str("text")?.unwrap_or_default(),
            None => "",
        };
        let code = match item.get_object(item_code_property(ctx.version))? {
            Some(concept) => concept.get_str("text")?.map(String::from),
            None => None,
        };
        let quantity = match item.get_object("quantity")? {
            Some(quantity) => quantity.get_decimal("value")?,
            None => None,
        };
        let price = match item.get_object("unitPrice")? {
            Some(money) => money.get_decimal("value")?,
            None => None,
        };
        let Some(code) = code else {
            errors.push(format!("Missing the code of claim item {sequence}"));
            continue;
        };
        if category == codes.item_code {
            claim.items.push(ClaimItem {
                code,
                qty_provided: quantity,
                price_asked: price,
            });
        } else if category == codes.service_code {
            claim.services.push(ClaimService {
                code,
                qty_provided: quantity,
                price_asked: price,
            });
        } else {
            errors.push(format!(
                "Could not assign category {category} for claim item {sequence}"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::FhirConfig;
    use crate::domain::{ClaimAdmin, DiagnosisCode, HealthFacility, Insuree};
    use chrono::NaiveDate;

    fn claim() -> Claim {
        Claim {
            id: Some(100),
            code: Some("CLM-1".to_string()),
            date_claimed: NaiveDate::from_ymd_opt(2024, 5, 2),
            date_from: NaiveDate::from_ymd_opt(2024, 5, 1),
            health_facility: Some(HealthFacility {
                id: Some(8),
                ..Default::default()
            }),
            insuree: Some(Insuree {
                id: Some(12),
                ..Default::default()
            }),
            admin: Some(ClaimAdmin {
                id: Some(3),
                ..Default::default()
            }),
            icd: Some(DiagnosisCode::new("A01")),
            icd_2: Some(DiagnosisCode::new("B02")),
            claimed: Some(45.5),
            guarantee_id: Some("G-77".to_string()),
            visit_type: Some("E".to_string()),
            items: vec![ClaimItem {
                code: "PARA500".to_string(),
                qty_provided: Some(2.0),
                price_asked: Some(1.5),
            }],
            services: vec![ClaimService {
                code: "CONS".to_string(),
                qty_provided: Some(1.0),
                price_asked: Some(42.5),
            }],
            ..Default::default()
        }
    }

    fn repository() -> InMemoryRepository {
        let source = claim();
        InMemoryRepository::new()
            .with_health_facility(source.health_facility.unwrap())
            .with_insuree(source.insuree.unwrap())
            .with_claim_admin(source.admin.unwrap())
            .with_diagnosis(DiagnosisCode::new("A01"))
            .with_diagnosis(DiagnosisCode::new("B02"))
    }

    #[test]
    fn test_diagnoses_numbered_and_tagged() {
        let config = FhirConfig::default();
        let repository = repository();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        let diagnoses = fhir_claim.objects("diagnosis").unwrap();
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(diagnoses[1].get_integer("sequence").unwrap(), Some(2));
        let tag = diagnoses[1].objects("type").unwrap()[0];
        assert_eq!(tag.get_str("text").unwrap(), Some("icd_2"));
    }

    #[test]
    fn test_round_trip_through_repository() {
        let config = FhirConfig::default();
        let repository = repository();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let source = claim();

        let fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &source).unwrap();
        let decoded = ClaimConverter::to_imis_obj(&ctx, &fhir_claim, None).unwrap();
        assert_eq!(decoded.code, source.code);
        assert_eq!(decoded.date_claimed, source.date_claimed);
        assert_eq!(decoded.date_from, source.date_from);
        assert_eq!(decoded.icd_2.map(|code| code.code), Some("B02".to_string()));
        assert_eq!(decoded.claimed, Some(45.5));
        assert_eq!(decoded.guarantee_id.as_deref(), Some("G-77"));
        assert_eq!(decoded.visit_type.as_deref(), Some("E"));
        assert_eq!(decoded.items, source.items);
        assert_eq!(decoded.services, source.services);
        assert_eq!(decoded.icd.map(|code| code.code), Some("A01".to_string()));
    }

    #[test]
    fn test_r4_items_use_product_or_service() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);

        let fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        let items = fhir_claim.objects("item").unwrap();
        let product = items[0].get_object("productOrService").unwrap().unwrap();
        assert_eq!(product.get_str("text").unwrap(), Some("PARA500"));
    }

    #[test]
    fn test_r4_records_without_uuid_leave_references_unset() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);

        let fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        for property in ["facility", "patient", "enterer"] {
            assert!(fhir_claim.get_object(property).unwrap().is_none(), "{property}");
        }

        let document = serde_json::Value::Object(fhir_claim.to_dict().unwrap());
        let decoded = FhirObject::from_dict(FhirVersion::R4, "Claim", &document).unwrap();
        assert_eq!(decoded, fhir_claim);
    }

    #[test]
    fn test_unresolved_fields_collected() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        let err = ClaimConverter::to_imis_obj(&ctx, &fhir_claim, None).unwrap_err();
        assert_eq!(
            err.issues(),
            [
                "Missing the facility reference".to_string(),
                "Missing the patient reference".to_string(),
                "Could not find diagnosis code A01".to_string(),
                "Could not find diagnosis code B02".to_string(),
                "Missing the main diagnosis for claim".to_string(),
                "Missing the enterer reference".to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_item_category() {
        let config = FhirConfig::default();
        let repository = repository();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let mut fhir_claim = ClaimConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        let mut item = ctx.new_object("ClaimItem").unwrap();
        item.set("sequence", 9i64).unwrap();
        item.set(
            "category",
            build_simple_codeable_concept(&ctx, "device").unwrap(),
        )
        .unwrap();
        item.set("service", build_simple_codeable_concept(&ctx, "X").unwrap())
            .unwrap();
        fhir_claim.append("item", item).unwrap();

        let err = ClaimConverter::to_imis_obj(&ctx, &fhir_claim, None).unwrap_err();
        assert_eq!(
            err.issues(),
            ["Could not assign category device for claim item 9".to_string()]
        );
    }
}
