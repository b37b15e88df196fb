//! Location, whose `type` became a list in R4

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Decimal, Named, Str};
use crate::model::property::TypeDef;

pub static LOCATION_STU3: TypeDef = TypeDef::new(
    "Location",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("status", Str),
        P::scalar("operationalStatus", Named("Coding")),
        P::scalar("name", Str),
        P::list("alias", Str),
        P::scalar("description", Str),
        P::scalar("mode", Str),
        P::scalar("type", Named("CodeableConcept")),
        P::list("telecom", Named("ContactPoint")),
        P::scalar("address", Named("Address")),
        P::scalar("physicalType", Named("CodeableConcept")),
        P::scalar("position", Named("LocationPosition")),
        P::scalar("managingOrganization", Named("Reference")),
        P::scalar("partOf", Named("Reference")),
        P::list("endpoint", Named("Reference")),
    ],
);

pub static LOCATION_R4: TypeDef = TypeDef::new(
    "Location",
    Some("DomainResource"),
    &[
        P::list("identifier", Named("Identifier")),
        P::scalar("status", Str),
        P::scalar("operationalStatus", Named("Coding")),
        P::scalar("name", Str),
        P::list("alias", Str),
        P::scalar("description", Str),
        P::scalar("mode", Str),
        P::list("type", Named("CodeableConcept")),
        P::list("telecom", Named("ContactPoint")),
        P::scalar("address", Named("Address")),
        P::scalar("physicalType", Named("CodeableConcept")),
        P::scalar("position", Named("LocationPosition")),
        P::scalar("managingOrganization", Named("Reference")),
        P::scalar("partOf", Named("Reference")),
        P::scalar("availabilityExceptions", Str),
        P::list("endpoint", Named("Reference")),
    ],
);

pub static LOCATION_POSITION: TypeDef = TypeDef::new(
    "LocationPosition",
    Some("BackboneElement"),
    &[
        P::scalar("longitude", Decimal).required(),
        P::scalar("latitude", Decimal).required(),
        P::scalar("altitude", Decimal),
    ],
);

pub static STU3_TYPES: &[&TypeDef] = &[&LOCATION_STU3, &LOCATION_POSITION];
pub static R4_TYPES: &[&TypeDef] = &[&LOCATION_R4, &LOCATION_POSITION];
