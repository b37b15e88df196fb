//! Claim ↔ ClaimResponse
//!
//! The outbound direction reports the adjudication state of a claim. The
//! inbound direction is claim adjudication: the claim is looked up by its
//! code and the status, adjustment, processed date, approved amount and
//! rejection reason carried by the response are applied to it.
//!
//! R4 responses are built by [`super::r4::claim_response`], which shares the
//! field builders below.

use super::collector::ErrorCollector;
use super::common::{
    build_codeable_concept, build_money, build_simple_codeable_concept, find_identifier_value,
    first_coding, format_date, parse_date,
};
use super::{
    claim, ClaimConverter, CommunicationRequestConverter, ConversionContext, FhirConverter,
    ReferenceConverter,
};
use crate::adapters::RecordKey;
use crate::domain::{
    AuditUser, Claim, Result, CLAIM_STATUS_CHECKED, CLAIM_STATUS_ENTERED, CLAIM_STATUS_PROCESSED,
    CLAIM_STATUS_REJECTED, CLAIM_STATUS_VALUATED,
};
use crate::model::{FhirObject, FhirVersion};
use chrono::Utc;

pub struct ClaimResponseConverter;

impl FhirConverter for ClaimResponseConverter {
    type Record = Claim;
    const RESOURCE_TYPE: &'static str = "ClaimResponse";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, claim: &Claim) -> Result<FhirObject> {
        if ctx.version == FhirVersion::R4 {
            return super::r4::claim_response::to_fhir_obj(ctx, claim);
        }
        tracing::debug!(version = %ctx.version, code = ?claim.code, "Converting claim to ClaimResponse");
        let mut response = ctx.new_object(Self::RESOURCE_TYPE)?;
        response.set_opt("id", claim.code.as_deref())?;
        claim::build_fhir_identifiers(ctx, &mut response, claim)?;
        response.set("created", format_date(ctx, Utc::now().date_naive())?)?;
        build_fhir_outcome(ctx, &mut response, claim)?;
        build_fhir_payment(ctx, &mut response, claim)?;
        if let Some(approved) = claim.approved {
            response.set(
                "totalBenefit",
                build_money(ctx, approved, Some(ctx.config.general.currency.as_str()))?,
            )?;
        }
        build_fhir_errors(ctx, &mut response, claim)?;
        build_fhir_communication_request(ctx, &mut response, claim)?;
        Ok(response)
    }

    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        response: &FhirObject,
        audit_user: Option<&AuditUser>,
    ) -> Result<Claim> {
        ctx.expect_resource(response, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Adjudicating claim from ClaimResponse");

        let mut errors = ErrorCollector::new();
        let claim = resolve_claim(ctx, response, &mut errors)?;
        let mut claim = claim.unwrap_or_default();
        if let Some(user) = audit_user {
            claim.audit_user_id = Some(user.audit_id(ctx.config.general.default_audit_user_id));
        }

        build_imis_outcome(&mut claim, response, &mut errors)?;
        build_imis_payment(ctx, &mut claim, response)?;
        match ctx.version {
            FhirVersion::Stu3 => {
                if let Some(total_benefit) = response.get_object("totalBenefit")? {
                    claim.approved = total_benefit.get_decimal("value")?;
                }
            }
            FhirVersion::R4 => super::r4::claim_response::build_imis_totals(ctx, &mut claim, response)?,
        }
        build_imis_errors(&mut claim, response)?;
        errors.finish(Self::RESOURCE_TYPE, claim)
    }
}

/// Outcome coded with the numeric status and the configured display text
///
/// Statuses outside the configured mapping leave the outcome unset.
pub(crate) fn build_fhir_outcome(
    ctx: &ConversionContext<'_>,
    response: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let Some(status) = claim.status else {
        return Ok(());
    };
    let Some(display) = ctx.config.claim.status_display(status) else {
        tracing::debug!(status, "Claim status has no outcome mapping");
        return Ok(());
    };
    response.set(
        "outcome",
        build_codeable_concept(ctx, Some(&status.to_string()), None, Some(display))?,
    )
}

pub(crate) fn build_fhir_payment(
    ctx: &ConversionContext<'_>,
    response: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    if claim.adjustment.is_none() && claim.date_processed.is_none() {
        return Ok(());
    }
    let mut payment = ctx.new_object("ClaimResponsePayment")?;
    if let Some(adjustment) = &claim.adjustment {
        payment.set(
            "adjustmentReason",
            build_simple_codeable_concept(ctx, adjustment)?,
        )?;
    }
    if let Some(date_processed) = claim.date_processed {
        payment.set("date", format_date(ctx, date_processed)?)?;
    }
    response.set("payment", payment)
}

/// Rejection reason as a coded error; reason `0` means none
pub(crate) fn build_fhir_errors(
    ctx: &ConversionContext<'_>,
    response: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    let Some(reason) = claim.rejection_reason.filter(|reason| *reason != 0) else {
        return Ok(());
    };
    let mut error = ctx.new_object("ClaimResponseError")?;
    error.set(
        "code",
        build_codeable_concept(ctx, Some(&reason.to_string()), None, None)?,
    )?;
    response.append("error", error)
}

pub(crate) fn build_fhir_communication_request(
    ctx: &ConversionContext<'_>,
    response: &mut FhirObject,
    claim: &Claim,
) -> Result<()> {
    if let Some(feedback) = &claim.feedback {
        let reference = CommunicationRequestConverter::build_fhir_resource_reference(ctx, feedback)?;
        if !reference.is_empty() {
            response.append("communicationRequest", reference)?;
        }
    }
    Ok(())
}

/// Looks the claim up by the claim code identifier, then by the request reference
fn resolve_claim(
    ctx: &ConversionContext<'_>,
    response: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<Option<Claim>> {
    if let Some(code) =
        find_identifier_value(ctx, response, &ctx.config.identifier.claim_code_type)?
    {
        let claim = ClaimConverter::find_by_key(ctx, &RecordKey::Code(code.to_string()))?;
        errors.valid_condition(claim.is_none(), format!("Could not find claim {code}"));
        return Ok(claim);
    }
    if let Some(request) = response.get_object("request")? {
        if let Some(claim) = ClaimConverter::get_imis_obj_by_fhir_reference(ctx, request)? {
            return Ok(Some(claim));
        }
    }
    errors.push("Missing the claim code");
    Ok(None)
}

fn build_imis_outcome(
    claim: &mut Claim,
    response: &FhirObject,
    errors: &mut ErrorCollector,
) -> Result<()> {
    let Some(outcome) = response.get_object("outcome")? else {
        return Ok(());
    };
    let Some(code) = first_coding(outcome)?
        .map(|coding| coding.get_str("code"))
        .transpose()?
        .flatten()
    else {
        return Ok(());
    };
    match code.parse::<i32>().ok().filter(|status| is_claim_status(*status)) {
        Some(status) => claim.status = Some(status),
        None => errors.push(format!("Unknown claim status {code}")),
    }
    Ok(())
}

fn is_claim_status(status: i32) -> bool {
    matches!(
        status,
        CLAIM_STATUS_REJECTED
            | CLAIM_STATUS_ENTERED
            | CLAIM_STATUS_CHECKED
            | CLAIM_STATUS_PROCESSED
            | CLAIM_STATUS_VALUATED
    )
}

fn build_imis_payment(
    ctx: &ConversionContext<'_>,
    claim: &mut Claim,
    response: &FhirObject,
) -> Result<()> {
    let Some(payment) = response.get_object("payment")? else {
        return Ok(());
    };
    if let Some(reason) = payment.get_object("adjustmentReason")? {
        claim.adjustment = reason.get_str("text")?.map(String::from);
    }
    if let Some(date) = payment.get_str("date")?.and_then(|raw| parse_date(ctx, raw)) {
        claim.date_processed = Some(date);
    }
    Ok(())
}

fn build_imis_errors(claim: &mut Claim, response: &FhirObject) -> Result<()> {
    let Some(error) = response.objects("error")?.into_iter().next() else {
        return Ok(());
    };
    let Some(code) = error.get_object("code")? else {
        return Ok(());
    };
    if let Some(coding) = first_coding(code)? {
        claim.rejection_reason = coding.get_str("code")?.and_then(|raw| raw.parse().ok());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::config::FhirConfig;
    use crate::domain::{FhirError, Feedback};
    use chrono::NaiveDate;
    use test_case::test_case;

    fn claim() -> Claim {
        Claim {
            id: Some(100),
            code: Some("CLM-1".to_string()),
            status: Some(8),
            approved: Some(42.5),
            adjustment: Some("Partial approval".to_string()),
            date_processed: NaiveDate::from_ymd_opt(2024, 2, 1),
            rejection_reason: Some(0),
            feedback: Some(Feedback {
                id: Some(4),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test_case(1, "rejected")]
    #[test_case(2, "entered")]
    #[test_case(4, "checked")]
    #[test_case(8, "processed")]
    #[test_case(16, "valuated")]
    fn test_outcome_for_each_status(status: i32, display: &str) {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let source = Claim {
            status: Some(status),
            ..claim()
        };

        let response = ClaimResponseConverter::to_fhir_obj(&ctx, &source).unwrap();
        let outcome = response.get_object("outcome").unwrap().unwrap();
        let coding = first_coding(outcome).unwrap().unwrap();
        assert_eq!(coding.get_str("code").unwrap(), Some(status.to_string().as_str()));
        assert_eq!(outcome.get_str("text").unwrap(), Some(display));
    }

    #[test_case(0)]
    #[test_case(3)]
    #[test_case(32)]
    fn test_unmapped_status_leaves_outcome_unset(status: i32) {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let source = Claim {
            status: Some(status),
            ..claim()
        };

        let response = ClaimResponseConverter::to_fhir_obj(&ctx, &source).unwrap();
        assert!(response.get_object("outcome").unwrap().is_none());
    }

    #[test]
    fn test_stu3_response_fields() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);

        let response = ClaimResponseConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        assert_eq!(response.get_str("id").unwrap(), Some("CLM-1"));
        let benefit = response.get_object("totalBenefit").unwrap().unwrap();
        assert_eq!(benefit.get_decimal("value").unwrap(), Some(42.5));
        let payment = response.get_object("payment").unwrap().unwrap();
        assert_eq!(payment.get_str("date").unwrap(), Some("2024-02-01"));
        assert!(response.list("error").unwrap().is_empty());
        let requests = response.objects("communicationRequest").unwrap();
        assert_eq!(
            requests[0].get_str("reference").unwrap(),
            Some("CommunicationRequest/4")
        );
    }

    #[test]
    fn test_adjudication_applies_response() {
        let config = FhirConfig::default();
        let stored = Claim {
            status: Some(2),
            approved: None,
            adjustment: None,
            date_processed: None,
            ..claim()
        };
        let repository = InMemoryRepository::new().with_claim(stored);
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let source = Claim {
            rejection_reason: Some(7),
            ..claim()
        };

        let response = ClaimResponseConverter::to_fhir_obj(&ctx, &source).unwrap();
        let user = AuditUser::new("admin", 5);
        let adjudicated =
            ClaimResponseConverter::to_imis_obj(&ctx, &response, Some(&user)).unwrap();
        assert_eq!(adjudicated.id, Some(100));
        assert_eq!(adjudicated.status, Some(8));
        assert_eq!(adjudicated.approved, Some(42.5));
        assert_eq!(adjudicated.adjustment.as_deref(), Some("Partial approval"));
        assert_eq!(adjudicated.date_processed, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(adjudicated.rejection_reason, Some(7));
        assert_eq!(adjudicated.audit_user_id, Some(5));
    }

    #[test]
    fn test_unknown_status_and_claim_collected() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let mut response = ClaimResponseConverter::to_fhir_obj(&ctx, &claim()).unwrap();
        response
            .set(
                "outcome",
                build_codeable_concept(&ctx, Some("3"), None, None).unwrap(),
            )
            .unwrap();

        let err = ClaimResponseConverter::to_imis_obj(&ctx, &response, None).unwrap_err();
        assert!(matches!(err, FhirError::RequestProcess(_)));
        assert_eq!(
            err.issues(),
            [
                "Could not find claim CLM-1".to_string(),
                "Unknown claim status 3".to_string(),
            ]
        );
    }
}
