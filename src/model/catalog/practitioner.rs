//! Practitioner and PractitionerRole

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Named, Str};
use crate::model::property::TypeDef;

pub static PRACTITIONER: TypeDef = TypeDef::new(
    "Practitioner",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("active", Boolean),
        P::list("name", Named("HumanName")),
        P::list("telecom", Named("ContactPoint")),
        P::list("address", Named("Address")),
        P::scalar("gender", Str),
        P::scalar("birthDate", Date),
        P::list("photo", Named("Attachment")),
        P::list("qualification", Named("PractitionerQualification")),
        P::list("communication", Named("CodeableConcept")),
    ],
);

pub static PRACTITIONER_QUALIFICATION: TypeDef = TypeDef::new(
    "PractitionerQualification",
    Some("BackboneElement"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("code", Named("CodeableConcept")).required(),
        P::scalar("period", Named("Period")),
        P::scalar("issuer", Named("Reference")),
    ],
);

pub static PRACTITIONER_ROLE: TypeDef = TypeDef::new(
    "PractitionerRole",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("active", Boolean),
        P::scalar("period", Named("Period")),
        P::scalar("practitioner", Named("Reference")),
        P::scalar("organization", Named("Reference")),
        P::list("code", Named("CodeableConcept")),
        P::list("specialty", Named("CodeableConcept")),
        P::list("location", Named("Reference")),
        P::list("healthcareService", Named("Reference")),
        P::list("telecom", Named("ContactPoint")),
        P::list("availableTime", Named("PractitionerRoleAvailableTime")),
        P::list("notAvailable", Named("PractitionerRoleNotAvailable")),
        P::scalar("availabilityExceptions", Str),
        P::list("endpoint", Named("Reference")),
    ],
);

pub static PRACTITIONER_ROLE_AVAILABLE_TIME: TypeDef = TypeDef::new(
    "PractitionerRoleAvailableTime",
    Some("BackboneElement"),
    &[
        P::list("daysOfWeek", Str),
        P::scalar("allDay", Boolean),
        P::scalar("availableStartTime", Str),
        P::scalar("availableEndTime", Str),
    ],
);

pub static PRACTITIONER_ROLE_NOT_AVAILABLE: TypeDef = TypeDef::new(
    "PractitionerRoleNotAvailable",
    Some("BackboneElement"),
    &[
        P::scalar("description", Str).required(),
        P::scalar("during", Named("Period")),
    ],
);

pub static TYPES: &[&TypeDef] = &[
    &PRACTITIONER,
    &PRACTITIONER_QUALIFICATION,
    &PRACTITIONER_ROLE,
    &PRACTITIONER_ROLE_AVAILABLE_TIME,
    &PRACTITIONER_ROLE_NOT_AVAILABLE,
];
