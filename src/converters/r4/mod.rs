//! R4-specific converter variants
//!
//! Resources whose R4 shape diverges from STU3 beyond renamed properties get
//! their own builders here; the STU3 converters dispatch on the context's
//! version. The price catalog resources (`ActivityDefinition`, `Medication`)
//! exist only in R4 and their converters refuse other versions.

pub mod activity_definition;
pub mod claim_response;
pub mod location;
pub mod medication;

pub use activity_definition::ActivityDefinitionConverter;
pub use medication::MedicationConverter;

use super::common::build_money;
use super::ConversionContext;
use crate::domain::{FhirError, Result};
use crate::model::{FhirObject, FhirVersion};

/// Fails with [`FhirError::NotSupported`] outside R4
pub(crate) fn require_r4(ctx: &ConversionContext<'_>, resource_type: &str) -> Result<()> {
    if ctx.version != FhirVersion::R4 {
        return Err(FhirError::NotSupported(format!(
            "{resource_type} is only available in r4, not {}",
            ctx.version
        )));
    }
    Ok(())
}

/// Unit price extension in the configured currency
pub(crate) fn build_unit_price_extension(
    ctx: &ConversionContext<'_>,
    price: f64,
) -> Result<FhirObject> {
    let mut extension = ctx.new_object("Extension")?;
    extension.set("url", ctx.config.medical.unit_price_url.as_str())?;
    extension.set(
        "valueMoney",
        build_money(ctx, price, Some(ctx.config.general.currency.as_str()))?,
    )?;
    Ok(extension)
}

/// Value of the unit price extension, if present
pub(crate) fn find_unit_price(
    ctx: &ConversionContext<'_>,
    resource: &FhirObject,
) -> Result<Option<f64>> {
    for extension in resource.objects("extension")? {
        if extension.get_str("url")? != Some(ctx.config.medical.unit_price_url.as_str()) {
            continue;
        }
        if let Some(money) = extension.get_object("valueMoney")? {
            return money.get_decimal("value");
        }
    }
    Ok(None)
}
