//! Resource base types

use crate::model::property::PropertyDescriptor as P;
use crate::model::property::PropertyType::{Named, Str};
use crate::model::property::TypeDef;

pub static RESOURCE: TypeDef = TypeDef::new(
    "Resource",
    None,
    &[
        P::scalar("id", Str),
        P::scalar("meta", Named("Meta")),
        P::scalar("implicitRules", Str),
        P::scalar("language", Str),
    ],
);

pub static DOMAIN_RESOURCE: TypeDef = TypeDef::new(
    "DomainResource",
    Some("Resource"),
    &[
        P::scalar("text", Named("Narrative")),
        P::list("contained", Named("Resource")),
        P::list("extension", Named("Extension")),
        P::list("modifierExtension", Named("Extension")),
    ],
);

pub static TYPES: &[&TypeDef] = &[&RESOURCE, &DOMAIN_RESOURCE];
