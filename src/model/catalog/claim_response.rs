//! ClaimResponse and its components
//!
//! STU3 carries totals as `totalCost` / `totalBenefit`; R4 replaces them with
//! a `total` list of categorized amounts and renames `requestProvider` to
//! `requestor`.

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Boolean, Date, Decimal, Integer, Named, Str};
use crate::model::property::TypeDef;

pub static CLAIM_RESPONSE_STU3: TypeDef = TypeDef::new(
    "ClaimResponse",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("status", Str),
        P::scalar("patient", Named("Reference")),
        P::scalar("created", Date),
        P::scalar("insurer", Named("Reference")),
        P::scalar("requestProvider", Named("Reference")),
        P::scalar("requestOrganization", Named("Reference")),
        P::scalar("request", Named("Reference")),
        P::scalar("outcome", Named("CodeableConcept")),
        P::scalar("disposition", Str),
        P::scalar("payeeType", Named("CodeableConcept")),
        P::list("item", Named("ClaimResponseItem")),
        P::list("addItem", Named("ClaimResponseAddItem")),
        P::list("error", Named("ClaimResponseError")),
        P::scalar("totalCost", Named("Money")),
        P::scalar("unallocDeductable", Named("Money")),
        P::scalar("totalBenefit", Named("Money")),
        P::scalar("payment", Named("ClaimResponsePayment")),
        P::scalar("reserved", Named("Coding")),
        P::scalar("form", Named("CodeableConcept")),
        P::list("processNote", Named("ClaimResponseProcessNote")),
        P::list("communicationRequest", Named("Reference")),
        P::list("insurance", Named("ClaimResponseInsurance")),
    ],
);

pub static CLAIM_RESPONSE_R4: TypeDef = TypeDef::new(
    "ClaimResponse",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("status", Str),
        P::scalar("type", Named("CodeableConcept")),
        P::list("subType", Named("CodeableConcept")),
        P::scalar("use", Str),
        P::scalar("patient", Named("Reference")),
        P::scalar("created", Date),
        P::scalar("insurer", Named("Reference")),
        P::scalar("requestor", Named("Reference")),
        P::scalar("request", Named("Reference")),
        P::scalar("outcome", Named("CodeableConcept")),
        P::scalar("disposition", Str),
        P::scalar("preAuthRef", Str),
        P::scalar("payeeType", Named("CodeableConcept")),
        P::list("item", Named("ClaimResponseItem")),
        P::list("addItem", Named("ClaimResponseAddItem")),
        P::list("adjudication", Named("ClaimResponseItemAdjudication")),
        P::list("total", Named("ClaimResponseTotal")),
        P::scalar("payment", Named("ClaimResponsePayment")),
        P::scalar("fundsReserve", Named("CodeableConcept")),
        P::scalar("formCode", Named("CodeableConcept")),
        P::scalar("form", Named("Attachment")),
        P::list("processNote", Named("ClaimResponseProcessNote")),
        P::list("communicationRequest", Named("Reference")),
        P::list("insurance", Named("ClaimResponseInsurance")),
        P::list("error", Named("ClaimResponseError")),
    ],
);

pub static CLAIM_RESPONSE_ITEM: TypeDef = TypeDef::new(
    "ClaimResponseItem",
    Some("BackboneElement"),
    &[
        P::scalar("itemSequence", Integer).required(),
        P::list("noteNumber", Integer),
        P::list("adjudication", Named("ClaimResponseItemAdjudication")),
    ],
);

pub static CLAIM_RESPONSE_ITEM_ADJUDICATION: TypeDef = TypeDef::new(
    "ClaimResponseItemAdjudication",
    Some("BackboneElement"),
    &[
        P::scalar("category", Named("CodeableConcept")).required(),
        P::scalar("reason", Named("CodeableConcept")),
        P::scalar("amount", Named("Money")),
        P::scalar("value", Decimal),
    ],
);

pub static CLAIM_RESPONSE_ADD_ITEM: TypeDef = TypeDef::new(
    "ClaimResponseAddItem",
    Some("BackboneElement"),
    &[
        P::list("itemSequence", Integer),
        P::scalar("service", Named("CodeableConcept")),
        P::scalar("productOrService", Named("CodeableConcept")),
        P::list("modifier", Named("CodeableConcept")),
        P::scalar("fee", Named("Money")),
        P::list("noteNumber", Integer),
        P::list("adjudication", Named("ClaimResponseItemAdjudication")),
    ],
);

pub static CLAIM_RESPONSE_ERROR: TypeDef = TypeDef::new(
    "ClaimResponseError",
    Some("BackboneElement"),
    &[
        P::scalar("itemSequence", Integer),
        P::scalar("detailSequence", Integer),
        P::scalar("code", Named("CodeableConcept")).required(),
    ],
);

pub static CLAIM_RESPONSE_PAYMENT: TypeDef = TypeDef::new(
    "ClaimResponsePayment",
    Some("BackboneElement"),
    &[
        P::scalar("type", Named("CodeableConcept")),
        P::scalar("adjustment", Named("Money")),
        P::scalar("adjustmentReason", Named("CodeableConcept")),
        P::scalar("date", Date),
        P::scalar("amount", Named("Money")),
        P::scalar("identifier", Named("Identifier")),
    ],
);

pub static CLAIM_RESPONSE_PROCESS_NOTE: TypeDef = TypeDef::new(
    "ClaimResponseProcessNote",
    Some("BackboneElement"),
    &[
        P::scalar("number", Integer),
        P::scalar("type", Str),
        P::scalar("text", Str),
        P::scalar("language", Named("CodeableConcept")),
    ],
);

pub static CLAIM_RESPONSE_INSURANCE: TypeDef = TypeDef::new(
    "ClaimResponseInsurance",
    Some("BackboneElement"),
    &[
        P::scalar("sequence", Integer).required(),
        P::scalar("focal", Boolean).required(),
        P::scalar("coverage", Named("Reference")).required(),
        P::scalar("businessArrangement", Str),
        P::scalar("claimResponse", Named("Reference")),
    ],
);

pub static CLAIM_RESPONSE_TOTAL: TypeDef = TypeDef::new(
    "ClaimResponseTotal",
    Some("BackboneElement"),
    &[
        P::scalar("category", Named("CodeableConcept")).required(),
        P::scalar("amount", Named("Money")).required(),
    ],
);

pub static TYPES: &[&TypeDef] = &[
    &CLAIM_RESPONSE_ITEM,
    &CLAIM_RESPONSE_ITEM_ADJUDICATION,
    &CLAIM_RESPONSE_ADD_ITEM,
    &CLAIM_RESPONSE_ERROR,
    &CLAIM_RESPONSE_PAYMENT,
    &CLAIM_RESPONSE_PROCESS_NOTE,
    &CLAIM_RESPONSE_INSURANCE,
];

pub static STU3_TYPES: &[&TypeDef] = &[&CLAIM_RESPONSE_STU3];
pub static R4_TYPES: &[&TypeDef] = &[&CLAIM_RESPONSE_R4, &CLAIM_RESPONSE_TOTAL];
