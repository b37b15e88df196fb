//! Claim → ClaimResponse (R4)
//!
//! R4 replaces `totalBenefit` with a `total` list of categorized amounts and
//! links the response back to the claim and the insuree.

use crate::converters::claim::build_fhir_identifiers;
use crate::converters::claim_response::{
    build_fhir_communication_request, build_fhir_errors, build_fhir_outcome, build_fhir_payment,
};
use crate::converters::common::{build_codeable_concept, build_money, coding_code, format_date};
use crate::converters::{
    ClaimConverter, ClaimResponseConverter, ConversionContext, FhirConverter, PatientConverter,
    ReferenceConverter,
};
use crate::domain::{Claim, Result};
use crate::model::FhirObject;
use chrono::Utc;

pub const TOTAL_VALUATED: &str = "valuated";
pub const TOTAL_REINSURED: &str = "reinsured";
pub const TOTAL_APPROVED: &str = "approved";
pub const TOTAL_CLAIMED: &str = "claimed";

pub(crate) fn to_fhir_obj(ctx: &ConversionContext<'_>, claim: &Claim) -> Result<FhirObject> {
    tracing::debug!(version = %ctx.version, code = ?claim.code, "Converting claim to ClaimResponse");
    let mut response = ctx.new_object(ClaimResponseConverter::RESOURCE_TYPE)?;
    response.set_opt("id", claim.uuid.map(|uuid| uuid.to_string()))?;
    build_fhir_identifiers(ctx, &mut response, claim)?;
    if let Some(date_claimed) = claim.date_claimed {
        response.set("created", format_date(ctx, date_claimed)?)?;
    } else {
        response.set("created", format_date(ctx, Utc::now().date_naive())?)?;
    }
    let request = ClaimConverter::build_fhir_resource_reference(ctx, claim)?;
    if !request.is_empty() {
        response.set("request", request)?;
    }
    if let Some(insuree) = &claim.insuree {
        let patient = PatientConverter::build_fhir_resource_reference(ctx, insuree)?;
        if !patient.is_empty() {
            response.set("patient", patient)?;
        }
    }
    build_fhir_outcome(ctx, &mut response, claim)?;
    build_fhir_payment(ctx, &mut response, claim)?;
    build_fhir_totals(ctx, &mut response, claim)?;
    build_fhir_errors(ctx, &mut response, claim)?;
    build_fhir_communication_request(ctx, &mut response, claim)?;
    Ok(response)
}

/// Amounts in the order they are reported
fn claim_totals(claim: &Claim) -> [(&'static str, Option<f64>); 4] {
    [
        (TOTAL_VALUATED, claim.valuated),
        (TOTAL_REINSURED, claim.reinsured),
        (TOTAL_APPROVED, claim.approved),
        (TOTAL_CLAIMED, claim.claimed),
    ]
}

fn build_fhir_totals(
    ctx: &ConversionContext<'_>,
    response: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let system = ctx.config.claim.adjudication_system.as_str();
    let currency = ctx.config.general.currency.as_str();
    for (category, amount) in claim_totals(claim) {
        let Some(amount) = amount else {
            continue;
        };
        let mut total = ctx.new_object("ClaimResponseTotal")?;
        total.set(
            "category",
            build_codeable_concept(ctx, Some(category), Some(system), None)?,
        )?;
        total.set("amount", build_money(ctx, amount, Some(currency))?)?;
        response.append("total", total)?;
    }
    Ok(())
}

/// Applies the categorized totals back onto the claim
pub(crate) fn build_imis_totals(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    response: &FhirObject,
) -> Result<()> {
    let system = ctx.config.claim.adjudication_system.as_str();
    for total in response.objects("total")? {
        let Some(category) = total.get_object("category")? else {
            continue;
        };
        let amount = match total.get_object("amount")? {
            Some(money) => money.get_decimal("value")?,
            None => None,
        };
        match coding_code(category, system)? {
            Some(TOTAL_VALUATED) => claim.valuated = amount,
            Some(TOTAL_REINSURED) => claim.reinsured = amount,
            Some(TOTAL_APPROVED) => claim.approved = amount,
            Some(TOTAL_CLAIMED) => claim.claimed = amount,
            _ => {}
        }
    }
    Ok(())
}
