//! Price catalog resources: ActivityDefinition and Medication
//!
//! Only the R4 registry carries them.

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Named, Str};
use crate::model::property::TypeDef;

pub static ACTIVITY_DEFINITION: TypeDef = TypeDef::new(
    "ActivityDefinition",
    Some("DomainResource"),
    &[
        P::scalar("url", Str),
        P::list("identifier", Named("Identifier")),
        P::scalar("version", Str),
        P::scalar("name", Str),
        P::scalar("title", Str),
        P::scalar("subtitle", Str),
        P::scalar("status", Str).required(),
        P::scalar("experimental", Boolean),
        P::scalar("subjectCodeableConcept", Named("CodeableConcept")),
        P::scalar("subjectReference", Named("Reference")),
        P::scalar("date", Date),
        P::scalar("publisher", Str),
        P::scalar("description", Str),
        P::list("useContext", Named("UsageContext")),
        P::list("jurisdiction", Named("CodeableConcept")),
        P::scalar("purpose", Str),
        P::scalar("usage", Str),
        P::scalar("approvalDate", Date),
        P::scalar("lastReviewDate", Date),
        P::scalar("effectivePeriod", Named("Period")),
        P::list("topic", Named("CodeableConcept")),
        P::list("library", Str),
        P::scalar("kind", Str),
        P::scalar("code", Named("CodeableConcept")),
        P::scalar("intent", Str),
        P::scalar("priority", Str),
        P::scalar("doNotPerform", Boolean),
        P::scalar("timingTiming", Named("Timing")),
        P::scalar("timingDateTime", Date),
        P::scalar("timingPeriod", Named("Period")),
        P::scalar("location", Named("Reference")),
        P::scalar("quantity", Named("Quantity")),
        P::list("bodySite", Named("CodeableConcept")),
    ],
);

pub static USAGE_CONTEXT: TypeDef = TypeDef::new(
    "UsageContext",
    Some("Element"),
    &[
        P::scalar("code", Named("Coding")).required(),
        P::scalar("valueCodeableConcept", Named("CodeableConcept")),
        P::scalar("valueQuantity", Named("Quantity")),
        P::scalar("valueRange", Named("Range")),
        P::scalar("valueReference", Named("Reference")),
    ],
);

pub static MEDICATION: TypeDef = TypeDef::new(
    "Medication",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("code", Named("CodeableConcept")),
        P::scalar("status", Str),
        P::scalar("manufacturer", Named("Reference")),
        P::scalar("form", Named("CodeableConcept")),
        P::scalar("amount", Named("Ratio")),
        P::list("ingredient", Named("MedicationIngredient")),
        P::scalar("batch", Named("MedicationBatch")),
    ],
);

pub static MEDICATION_INGREDIENT: TypeDef = TypeDef::new(
    "MedicationIngredient",
    Some("BackboneElement"),
    &[
        P::scalar("itemCodeableConcept", Named("CodeableConcept")),
        P::scalar("itemReference", Named("Reference")),
        P::scalar("isActive", Boolean),
        P::scalar("strength", Named("Ratio")),
    ],
);

pub static MEDICATION_BATCH: TypeDef = TypeDef::new(
    "MedicationBatch",
    Some("BackboneElement"),
    &[
        P::scalar("lotNumber", Str),
        P::scalar("expirationDate", Date),
    ],
);

pub static STU3_TYPES: &[&TypeDef] = &[];
pub static R4_TYPES: &[&TypeDef] = &[
    &ACTIVITY_DEFINITION,
    &USAGE_CONTEXT,
    &MEDICATION,
    &MEDICATION_INGREDIENT,
    &MEDICATION_BATCH,
];
