//! General-purpose datatypes shared by STU3 and R4

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Decimal, Integer, Named, Str};
use crate::model::property::TypeDef;

pub static ELEMENT: TypeDef = TypeDef::new(
    "Element",
    None,
    &[
        P::scalar("id", Str),
        P::list("extension", Named("Extension")),
    ],
);

pub static BACKBONE_ELEMENT: TypeDef = TypeDef::new(
    "BackboneElement",
    Some("Element"),
    &[P::list("modifierExtension", Named("Extension"))],
);

pub static EXTENSION: TypeDef = TypeDef::new(
    "Extension",
    Some("Element"),
    &[
        P::scalar("url", Str).required(),
        P::scalar("valueBoolean", Boolean),
        P::scalar("valueInteger", Integer),
        P::scalar("valueDecimal", Decimal),
        P::scalar("valueString", Str),
        P::scalar("valueCode", Str),
        P::scalar("valueUri", Str),
        P::scalar("valueDate", Date),
        P::scalar("valueDateTime", Date),
        P::scalar("valueCoding", Named("Coding")),
        P::scalar("valueCodeableConcept", Named("CodeableConcept")),
        P::scalar("valueIdentifier", Named("Identifier")),
        P::scalar("valueMoney", Named("Money")),
        P::scalar("valuePeriod", Named("Period")),
        P::scalar("valueQuantity", Named("Quantity")),
        P::scalar("valueReference", Named("Reference")),
    ],
);

pub static CODING: TypeDef = TypeDef::new(
    "Coding",
    Some("Element"),
    &[
        P::scalar("system", Str),
        P::scalar("version", Str),
        P::scalar("code", Str),
        P::scalar("display", Str),
        P::scalar("userSelected", Boolean),
    ],
);

pub static CODEABLE_CONCEPT: TypeDef = TypeDef::new(
    "CodeableConcept",
    Some("Element"),
    &[
        P::list("coding", Named("Coding")),
        P::scalar("text", Str),
    ],
);

pub static IDENTIFIER: TypeDef = TypeDef::new(
    "Identifier",
    Some("Element"),
    &[
        P::scalar("use", Str),
        P::scalar("type", Named("CodeableConcept")),
        P::scalar("system", Str),
        P::scalar("value", Str),
        P::scalar("period", Named("Period")),
        P::scalar("assigner", Named("Reference")),
    ],
);

pub static PERIOD: TypeDef = TypeDef::new(
    "Period",
    Some("Element"),
    &[P::scalar("start", Date), P::scalar("end", Date)],
);

pub static REFERENCE: TypeDef = TypeDef::new(
    "Reference",
    Some("Element"),
    &[
        P::scalar("reference", Str),
        P::scalar("identifier", Named("Identifier")),
        P::scalar("display", Str),
    ],
);

pub static HUMAN_NAME: TypeDef = TypeDef::new(
    "HumanName",
    Some("Element"),
    &[
        P::scalar("use", Str),
        P::scalar("text", Str),
        P::scalar("family", Str),
        P::list("given", Str),
        P::list("prefix", Str),
        P::list("suffix", Str),
        P::scalar("period", Named("Period")),
    ],
);

pub static ADDRESS: TypeDef = TypeDef::new(
    "Address",
    Some("Element"),
    &[
        P::scalar("use", Str),
        P::scalar("type", Str),
        P::scalar("text", Str),
        P::list("line", Str),
        P::scalar("city", Str),
        P::scalar("district", Str),
        P::scalar("state", Str),
        P::scalar("postalCode", Str),
        P::scalar("country", Str),
        P::scalar("period", Named("Period")),
    ],
);

pub static CONTACT_POINT: TypeDef = TypeDef::new(
    "ContactPoint",
    Some("Element"),
    &[
        P::scalar("system", Str),
        P::scalar("value", Str),
        P::scalar("use", Str),
        P::scalar("rank", Integer),
        P::scalar("period", Named("Period")),
    ],
);

pub static MONEY: TypeDef = TypeDef::new(
    "Money",
    Some("Element"),
    &[P::scalar("value", Decimal), P::scalar("currency", Str)],
);

pub static QUANTITY: TypeDef = TypeDef::new(
    "Quantity",
    Some("Element"),
    &[
        P::scalar("value", Decimal),
        P::scalar("comparator", Str),
        P::scalar("unit", Str),
        P::scalar("system", Str),
        P::scalar("code", Str),
    ],
);

pub static AGE: TypeDef = TypeDef::new("Age", Some("Quantity"), &[]);
pub static COUNT: TypeDef = TypeDef::new("Count", Some("Quantity"), &[]);
pub static DISTANCE: TypeDef = TypeDef::new("Distance", Some("Quantity"), &[]);
pub static DURATION: TypeDef = TypeDef::new("Duration", Some("Quantity"), &[]);

pub static RANGE: TypeDef = TypeDef::new(
    "Range",
    Some("Element"),
    &[
        P::scalar("low", Named("Quantity")),
        P::scalar("high", Named("Quantity")),
    ],
);

pub static RATIO: TypeDef = TypeDef::new(
    "Ratio",
    Some("Element"),
    &[
        P::scalar("numerator", Named("Quantity")),
        P::scalar("denominator", Named("Quantity")),
    ],
);

pub static ANNOTATION: TypeDef = TypeDef::new(
    "Annotation",
    Some("Element"),
    &[
        P::scalar("authorReference", Named("Reference")),
        P::scalar("authorString", Str),
        P::scalar("time", Date),
        P::scalar("text", Str).required(),
    ],
);

pub static ATTACHMENT: TypeDef = TypeDef::new(
    "Attachment",
    Some("Element"),
    &[
        P::scalar("contentType", Str),
        P::scalar("language", Str),
        P::scalar("data", Str),
        P::scalar("url", Str),
        P::scalar("size", Integer),
        P::scalar("hash", Str),
        P::scalar("title", Str),
        P::scalar("creation", Date),
    ],
);

pub static META: TypeDef = TypeDef::new(
    "Meta",
    Some("Element"),
    &[
        P::scalar("versionId", Str),
        P::scalar("lastUpdated", Date),
        P::list("profile", Str),
        P::list("security", Named("Coding")),
        P::list("tag", Named("Coding")),
    ],
);

pub static NARRATIVE: TypeDef = TypeDef::new(
    "Narrative",
    Some("Element"),
    &[
        P::scalar("status", Str).required(),
        P::scalar("div", Str).required(),
    ],
);

pub static SAMPLED_DATA: TypeDef = TypeDef::new(
    "SampledData",
    Some("Element"),
    &[
        P::scalar("origin", Named("Quantity")).required(),
        P::scalar("period", Decimal).required(),
        P::scalar("factor", Decimal),
        P::scalar("lowerLimit", Decimal),
        P::scalar("upperLimit", Decimal),
        P::scalar("dimensions", Integer).required(),
        P::scalar("data", Str).required(),
    ],
);

pub static SIGNATURE: TypeDef = TypeDef::new(
    "Signature",
    Some("Element"),
    &[
        P::list("type", Named("Coding")).min(1),
        P::scalar("when", Date),
        P::scalar("whoUri", Str),
        P::scalar("whoReference", Named("Reference")),
        P::scalar("contentType", Str),
        P::scalar("blob", Str),
    ],
);

pub static TIMING: TypeDef = TypeDef::new(
    "Timing",
    Some("Element"),
    &[
        P::list("event", Date),
        P::scalar("repeat", Named("TimingRepeat")),
        P::scalar("code", Named("CodeableConcept")),
    ],
);

pub static TIMING_REPEAT: TypeDef = TypeDef::new(
    "TimingRepeat",
    Some("Element"),
    &[
        P::scalar("boundsDuration", Named("Duration")),
        P::scalar("boundsRange", Named("Range")),
        P::scalar("boundsPeriod", Named("Period")),
        P::scalar("count", Integer),
        P::scalar("countMax", Integer),
        P::scalar("duration", Decimal),
        P::scalar("durationMax", Decimal),
        P::scalar("durationUnit", Str),
        P::scalar("frequency", Integer),
        P::scalar("frequencyMax", Integer),
        P::scalar("period", Decimal),
        P::scalar("periodMax", Decimal),
        P::scalar("periodUnit", Str),
        P::list("dayOfWeek", Str),
        P::list("timeOfDay", Str),
        P::list("when", Str),
        P::scalar("offset", Integer),
    ],
);

pub static TYPES: &[&TypeDef] = &[
    &ELEMENT,
    &BACKBONE_ELEMENT,
    &EXTENSION,
    &CODING,
    &CODEABLE_CONCEPT,
    &IDENTIFIER,
    &PERIOD,
    &REFERENCE,
    &HUMAN_NAME,
    &ADDRESS,
    &CONTACT_POINT,
    &MONEY,
    &QUANTITY,
    &AGE,
    &COUNT,
    &DISTANCE,
    &DURATION,
    &RANGE,
    &RATIO,
    &ANNOTATION,
    &ATTACHMENT,
    &META,
    &NARRATIVE,
    &SAMPLED_DATA,
    &SIGNATURE,
    &TIMING,
    &TIMING_REPEAT,
];
