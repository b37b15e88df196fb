//! CommunicationRequest

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Date, Named, Str};
use crate::model::property::TypeDef;

pub static COMMUNICATION_REQUEST: TypeDef = TypeDef::new(
    "CommunicationRequest",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::list("basedOn", Named("Reference")),
        P::list("replaces", Named("Reference")),
        P::scalar("groupIdentifier", Named("Identifier")),
        P::scalar("status", Str),
        P::list("category", Named("CodeableConcept")),
        P::scalar("priority", Str),
        P::list("medium", Named("CodeableConcept")),
        P::scalar("subject", Named("Reference")),
        P::list("recipient", Named("Reference")),
        P::list("topic", Named("Reference")),
        P::list("about", Named("Reference")),
        P::scalar("context", Named("Reference")),
        P::list("payload", Named("CommunicationRequestPayload")),
        P::scalar("occurrenceDateTime", Date),
        P::scalar("occurrencePeriod", Named("Period")),
        P::scalar("authoredOn", Date),
        P::scalar("sender", Named("Reference")),
        P::scalar("requester", Named("Reference")),
        P::list("reasonCode", Named("CodeableConcept")),
        P::list("reasonReference", Named("Reference")),
        P::list("note", Named("Annotation")),
    ],
);

pub static COMMUNICATION_REQUEST_PAYLOAD: TypeDef = TypeDef::new(
    "CommunicationRequestPayload",
    Some("BackboneElement"),
    &[
        P::scalar("contentString", Str),
        P::scalar("contentAttachment", Named("Attachment")),
        P::scalar("contentReference", Named("Reference")),
    ],
);

pub static TYPES: &[&TypeDef] = &[&COMMUNICATION_REQUEST, &COMMUNICATION_REQUEST_PAYLOAD];
