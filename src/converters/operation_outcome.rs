//! Errors → OperationOutcome
//!
//! Every failure that reaches a client is rendered as a single-issue
//! OperationOutcome. The issue code is `not-found` for missing records and
//! `exception` for everything else; the details text is the error message.

use super::common::build_simple_codeable_concept;
use super::{ConversionContext, FhirConverter};
use crate::domain::{AuditUser, FhirError, Result};
use crate::model::FhirObject;

pub const ISSUE_SEVERITY_ERROR: &str = "error";

pub struct OperationOutcomeConverter;

impl OperationOutcomeConverter {
    /// Builds the outcome reporting `error`
    pub fn from_error(ctx: &ConversionContext<'_>, error: &FhirError) -> Result<FhirObject> {
        let codes = &ctx.config.issue_type;
        let code = match error {
            FhirError::NotFound(_) => &codes.code_for_not_found,
            _ => &codes.code_for_exception,
        };
        let mut issue = ctx.new_object("OperationOutcomeIssue")?;
        issue.set("severity", ISSUE_SEVERITY_ERROR)?;
        issue.set("code", code.as_str())?;
        issue.set(
            "details",
            build_simple_codeable_concept(ctx, &error.to_string())?,
        )?;

        let mut outcome = ctx.new_object(Self::RESOURCE_TYPE)?;
        outcome.append("issue", issue)?;
        Ok(outcome)
    }
}

impl FhirConverter for OperationOutcomeConverter {
    type Record = FhirError;
    const RESOURCE_TYPE: &'static str = "OperationOutcome";

    fn to_fhir_obj(ctx: &ConversionContext<'_>, error: &FhirError) -> Result<FhirObject> {
        Self::from_error(ctx, error)
    }

    fn to_imis_obj(
        _ctx: &ConversionContext<'_>,
        _resource: &FhirObject,
        _audit_user: Option<&AuditUser>,
    ) -> Result<FhirError> {
        Err(FhirError::NotSupported(
            "OperationOutcome cannot be converted to a domain record".to_string(),
        ))
    }
}
