//! Claim and its components
//!
//! R4 renamed `ClaimItem.service` to `productOrService`; everything else used
//! by the converters is shared.

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Decimal, Integer, Named, Str};
use crate::model::property::TypeDef;

pub static CLAIM: TypeDef = TypeDef::new(
    "Claim",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("status", Str),
        P::scalar("type", Named("CodeableConcept")),
        P::list("subType", Named("CodeableConcept")),
        P::scalar("use", Str),
        P::scalar("patient", Named("Reference")),
        P::scalar("billablePeriod", Named("Period")),
        P::scalar("created", Date),
        P::scalar("enterer", Named("Reference")),
        P::scalar("insurer", Named("Reference")),
        P::scalar("provider", Named("Reference")),
        P::scalar("organization", Named("Reference")),
        P::scalar("priority", Named("CodeableConcept")),
        P::scalar("fundsReserve", Named("CodeableConcept")),
        P::list("related", Named("ClaimRelated")),
        P::scalar("prescription", Named("Reference")),
        P::scalar("originalPrescription", Named("Reference")),
        P::scalar("payee", Named("ClaimPayee")),
        P::scalar("referral", Named("Reference")),
        P::scalar("facility", Named("Reference")),
        P::list("careTeam", Named("ClaimCareTeam")),
        P::list("information", Named("ClaimInformation")),
        P::list("diagnosis", Named("ClaimDiagnosis")),
        P::list("procedure", Named("ClaimProcedure")),
        P::list("insurance", Named("ClaimInsurance")),
        P::scalar("accident", Named("ClaimAccident")),
        P::scalar("employmentImpacted", Named("Period")),
        P::scalar("hospitalization", Named("Period")),
        P::list("item", Named("ClaimItem")),
        P::scalar("total", Named("Money")),
    ],
);

pub static CLAIM_RELATED: TypeDef = TypeDef::new(
    "ClaimRelated",
    Some("BackboneElement"),
    &[
        P::scalar("claim", Named("Reference")),
        P::scalar("relationship", Named("CodeableConcept")),
        P::scalar("reference", Named("Identifier")),
    ],
);

pub static CLAIM_PAYEE: TypeDef = TypeDef::new(
    "ClaimPayee",
    Some("BackboneElement"),
    &[
        P::scalar("type", Named("CodeableConcept")).required(),
        P::scalar("party", Named("Reference")),
    ],
);

pub static CLAIM_CARE_TEAM: TypeDef = TypeDef::new(
    "ClaimCareTeam",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("provider", Named("Reference")).required(),
        P::scalar("responsible", Boolean),
        P::scalar("role", Named("CodeableConcept")),
        P::scalar("qualification", Named("CodeableConcept")),
    ],
);

pub static CLAIM_INFORMATION: TypeDef = TypeDef::new(
    "ClaimInformation",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("category", Named("CodeableConcept")).required(),
        P::scalar("code", Named("CodeableConcept")),
        P::scalar("timingDate", Date),
        P::scalar("timingPeriod", Named("Period")),
        P::scalar("valueString", Str),
        P::scalar("valueQuantity", Named("Quantity")),
        P::scalar("valueAttachment", Named("Attachment")),
        P::scalar("valueReference", Named("Reference")),
        P::scalar("reason", Named("CodeableConcept")),
    ],
);

pub static CLAIM_DIAGNOSIS: TypeDef = TypeDef::new(
    "ClaimDiagnosis",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("diagnosisCodeableConcept", Named("CodeableConcept")),
        P::scalar("diagnosisReference", Named("Reference")),
        P::list("type", Named("CodeableConcept")),
        P::scalar("packageCode", Named("CodeableConcept")),
    ],
);

pub static CLAIM_PROCEDURE: TypeDef = TypeDef::new(
    "ClaimProcedure",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("date", Date),
        P::scalar("procedureCodeableConcept", Named("CodeableConcept")),
        P::scalar("procedureReference", Named("Reference")),
    ],
);

pub static CLAIM_INSURANCE: TypeDef = TypeDef::new(
    "ClaimInsurance",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("focal", Boolean).required(),
        P::scalar("coverage", Named("Reference")).required(),
        P::scalar("businessArrangement", Str),
        P::list("preAuthRef", Str),
        P::scalar("claimResponse", Named("Reference")),
    ],
);

pub static CLAIM_ACCIDENT: TypeDef = TypeDef::new(
    "ClaimAccident",
    Some("BackboneElement"),
    &[
        P::scalar("date", Date).required(),
        P::scalar("type", Named("CodeableConcept")),
        P::scalar("locationAddress", Named("Address")),
        P::scalar("locationReference", Named("Reference")),
    ],
);

pub static CLAIM_ITEM_STU3: TypeDef = TypeDef::new(
    "ClaimItem",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::list("careTeamLinkId", Integer),
        P::list("diagnosisLinkId", Integer),
        P::list("procedureLinkId", Integer),
        P::list("informationLinkId", Integer),
        P::scalar("revenue", Named("CodeableConcept")),
        P::scalar("category", Named("CodeableConcept")),
        P::scalar("service", Named("CodeableConcept")),
        P::list("modifier", Named("CodeableConcept")),
        P::list("programCode", Named("CodeableConcept")),
        P::scalar("servicedDate", Date),
        P::scalar("servicedPeriod", Named("Period")),
        P::scalar("locationCodeableConcept", Named("CodeableConcept")),
        P::scalar("locationReference", Named("Reference")),
        P::scalar("quantity", Named("Quantity")),
        P::scalar("unitPrice", Named("Money")),
        P::scalar("factor", Decimal),
        P::scalar("net", Named("Money")),
        P::list("udi", Named("Reference")),
        P::scalar("bodySite", Named("CodeableConcept")),
        P::list("subSite", Named("CodeableConcept")),
        P::list("encounter", Named("Reference")),
    ],
);

pub static CLAIM_ITEM_R4: TypeDef = TypeDef::new(
    "ClaimItem",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::list("careTeamSequence", Integer),
        P::list("diagnosisSequence", Integer),
        P::list("procedureSequence", Integer),
        P::list("informationSequence", Integer),
        P::scalar("revenue", Named("CodeableConcept")),
        P::scalar("category", Named("CodeableConcept")),
        P::scalar("productOrService", Named("CodeableConcept")),
        P::list("modifier", Named("CodeableConcept")),
        P::list("programCode", Named("CodeableConcept")),
        P::scalar("servicedDate", Date),
        P::scalar("servicedPeriod", Named("Period")),
        P::scalar("locationCodeableConcept", Named("CodeableConcept")),
        P::scalar("locationReference", Named("Reference")),
        P::scalar("quantity", Named("Quantity")),
        P::scalar("unitPrice", Named("Money")),
        P::scalar("factor", Decimal),
        P::scalar("net", Named("Money")),
        P::list("udi", Named("Reference")),
        P::scalar("bodySite", Named("CodeableConcept")),
        P::list("subSite", Named("CodeableConcept")),
        P::list("encounter", Named("Reference")),
    ],
);

pub static TYPES: &[&TypeDef] = &[
    &CLAIM,
    &CLAIM_RELATED,
    &CLAIM_PAYEE,
    &CLAIM_CARE_TEAM,
    &CLAIM_INFORMATION,
    &CLAIM_DIAGNOSIS,
    &CLAIM_PROCEDURE,
    &CLAIM_INSURANCE,
    &CLAIM_ACCIDENT,
];

pub static STU3_TYPES: &[&TypeDef] = &[&CLAIM_ITEM_STU3];
pub static R4_TYPES: &[&TypeDef] = &[&CLAIM_ITEM_R4];
