//! Patient and its components

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Integer, Named, Str};
use crate::model::property::TypeDef;

pub static PATIENT: TypeDef = TypeDef::new(
    "Patient",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("active", Boolean),
        P::list("name", Named("HumanName")),
        P::list("telecom", Named("ContactPoint")),
        P::scalar("gender", Str),
        P::scalar("birthDate", Date),
        P::scalar("deceasedBoolean", Boolean),
        P::scalar("deceasedDateTime", Date),
        P::list("address", Named("Address")),
        P::scalar("maritalStatus", Named("CodeableConcept")),
        P::scalar("multipleBirthBoolean", Boolean),
        P::scalar("multipleBirthInteger", Integer),
        P::list("photo", Named("Attachment")),
        P::list("contact", Named("PatientContact")),
        P::scalar("animal", Named("PatientAnimal")),
        P::list("communication", Named("PatientCommunication")),
        P::list("generalPractitioner", Named("Reference")),
        P::scalar("managingOrganization", Named("Reference")),
        P::list("link", Named("PatientLink")),
    ],
);

pub static PATIENT_CONTACT: TypeDef = TypeDef::new(
    "PatientContact",
    Some("BackboneElement"),
    &[
        P::list("relationship", Named("CodeableConcept")),
        P::scalar("name", Named("HumanName")),
        P::list("telecom", Named("ContactPoint")),
        P::scalar("address", Named("Address")),
        P::scalar("gender", Str),
        P::scalar("organization", Named("Reference")),
        P::scalar("period", Named("Period")),
    ],
);

pub static PATIENT_ANIMAL: TypeDef = TypeDef::new(
    "PatientAnimal",
    Some("BackboneElement"),
    &[
        P::scalar("species", Named("CodeableConcept")).required(),
        P::scalar("breed", Named("CodeableConcept")),
        P::scalar("genderStatus", Named("CodeableConcept")),
    ],
);

pub static PATIENT_COMMUNICATION: TypeDef = TypeDef::new(
    "PatientCommunication",
    Some("BackboneElement"),
    &[
        P::scalar("language", Named("CodeableConcept")).required(),
        P::scalar("preferred", Boolean),
    ],
);

pub static PATIENT_LINK: TypeDef = TypeDef::new(
    "PatientLink",
    Some("BackboneElement"),
    &[
        P::scalar("other", Named("Reference")).required(),
        P::scalar("type", Str).required(),
    ],
);

pub static TYPES: &[&TypeDef] = &[
    &PATIENT,
    &PATIENT_CONTACT,
    &PATIENT_ANIMAL,
    &PATIENT_COMMUNICATION,
    &PATIENT_LINK,
];
