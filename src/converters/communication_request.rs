//! Feedback ↔ CommunicationRequest

use super::collector::ErrorCollector;
use super::common::{build_fhir_id_identifier, build_fhir_pk, format_date, reference_id};
use super::{ClaimConverter, ConversionContext, FhirConverter, PatientConverter, ReferenceConverter};
use crate::adapters::RecordKey;
use crate::domain::{AuditUser, Claim, Feedback, Insuree, Result};
use crate::model::FhirObject;

pub struct CommunicationRequestConverter;

impl FhirConverter for CommunicationRequestConverter {
    type Record = Feedback;
    const RESOURCE_TYPE: &'static str = "CommunicationRequest";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, feedback: &Feedback) -> Result<FhirObject> {
        tracing::debug!(version = %ctx.version, id = ?feedback.id, "Converting feedback to CommunicationRequest");
        let mut request = ctx.new_object(Self::RESOURCE_TYPE)?;
        build_fhir_pk(&mut request, ctx.version, feedback.id, feedback.uuid)?;
        if let Some(identifier) = build_fhir_id_identifier(ctx, feedback.id, feedback.uuid)? {
            request.append("identifier", identifier)?;
        }
        if let Some(insuree_id) = feedback.insuree_id {
            let insuree = ctx
                .repository
                .find_insuree(&RecordKey::Id(insuree_id))?
                .unwrap_or(Insuree {
                    id: Some(insuree_id),
                    ..Default::default()
                });
            let subject = PatientConverter::build_fhir_resource_reference(ctx, &insuree)?;
            if !subject.is_empty() {
                request.set("subject", subject)?;
            }
        }
        if let Some(claim_id) = feedback.claim_id {
            let claim = ctx
                .repository
                .find_claim(&RecordKey::Id(claim_id))?
                .unwrap_or(Claim {
                    id: Some(claim_id),
                    ..Default::default()
                });
            let about = ClaimConverter::build_fhir_resource_reference(ctx, &claim)?;
            if !about.is_empty() {
                request.append("about", about)?;
            }
        }
        if let Some(comments) = &feedback.comments {
            let mut payload = ctx.new_object("CommunicationRequestPayload")?;
            payload.set("contentString", comments.as_str())?;
            request.append("payload", payload)?;
        }
        if let Some(feedback_date) = feedback.feedback_date {
            request.set("authoredOn", format_date(ctx, feedback_date)?)?;
        }
        Ok(request)
    }

    /// Resolves the stored feedback the request was issued for
    fn to_imis_obj(
        ctx: &ConversionContext<'_>,
        request: &FhirObject,
        _audit_user: Option<&AuditUser>,
    ) -> Result<Feedback> {
        ctx.expect_resource(request, Self::RESOURCE_TYPE)?;
        tracing::debug!(version = %ctx.version, "Converting CommunicationRequest to feedback");

        let mut errors = ErrorCollector::new();
        let mut feedback = None;
        match request.get_str("id")? {
            Some(id) => {
                feedback = Self::find_by_key(ctx, &RecordKey::from_reference_id(ctx.version, id))?;
                errors.valid_condition(feedback.is_none(), format!("Could not find feedback {id}"));
            }
            None => errors.push("Missing the communication request id"),
        }
        errors.check(Self::RESOURCE_TYPE)?;

        let mut feedback = feedback.unwrap_or_default();
        if let Some(payload) = request.objects("payload")?.first() {
            if let Some(comments) = payload.get_str("contentString")? {
                feedback.comments = Some(comments.to_string());
            }
        }
        Ok(feedback)
    }
}

impl ReferenceConverter for CommunicationRequestConverter {
    fn reference_id(ctx: &ConversionContext<'_>, feedback: &Feedback) -> Option<String> {
        reference_id(ctx.version, feedback.id, feedback.uuid)
    }

    fn find_by_key(ctx: &ConversionContext<'_>, key: &RecordKey) -> Result<Option<Feedback>> {
        ctx.repository.find_feedback(key)
    }
}
