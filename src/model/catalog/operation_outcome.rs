//! OperationOutcome

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Named, Str};
use crate::model::property::TypeDef;

pub static OPERATION_OUTCOME: TypeDef = TypeDef::new(
    "OperationOutcome",
    Some("DomainResource"),
    &[P::list("issue", Named("OperationOutcomeIssue"))],
);

pub static OPERATION_OUTCOME_ISSUE: TypeDef = TypeDef::new(
    "OperationOutcomeIssue",
    Some("BackboneElement"),
    &[
        P::scalar("severity", Str).required(),
        P::scalar("code", Str).required(),
        P::scalar("details", Named("CodeableConcept")),
        P::scalar("diagnostics", Str),
        P::list("location", Str),
        P::list("expression", Str),
    ],
);

pub static TYPES: &[&TypeDef] = &[&OPERATION_OUTCOME, &OPERATION_OUTCOME_ISSUE];
