//! Property descriptors and type definitions
//!
//! Every FHIR type is a [`TypeDef`]: a name, an optional parent type and an
//! ordered slice of [`PropertyDescriptor`]s. Both are `const`-constructible so
//! the whole catalog lives in static memory and is shared by every object.
//!
//! Composite property types are referenced by name ([`PropertyType::Named`]),
//! which lets types refer to each other before they are declared. Names are
//! checked when the [`Registry`](super::registry::Registry) is built.

use crate::domain::{FhirError, Result};
use std::fmt;

/// Declared type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// FHIR string, code, uri, id, markdown
    Str,
    /// FHIR integer, positiveInt, unsignedInt
    Integer,
    /// FHIR decimal
    Decimal,
    /// FHIR boolean
    Boolean,
    /// FHIR date / dateTime / instant literal
    Date,
    /// Composite type resolved by name
    Named(&'static str),
}

impl PropertyType {
    /// Name used in type error messages
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Str => "str",
            PropertyType::Integer => "int",
            PropertyType::Decimal => "float",
            PropertyType::Boolean => "bool",
            PropertyType::Date => "FHIRDate",
            PropertyType::Named(name) => name,
        }
    }
}

/// Upper cardinality bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxCount {
    Bounded(u32),
    Unbounded,
}

impl MaxCount {
    /// Whether a list of `len` elements may receive one more element
    pub fn admits_another(&self, len: usize) -> bool {
        match self {
            MaxCount::Bounded(max) => len < *max as usize,
            MaxCount::Unbounded => true,
        }
    }

    /// Whether `len` elements fit
    pub fn fits(&self, len: usize) -> bool {
        match self {
            MaxCount::Bounded(max) => len <= *max as usize,
            MaxCount::Unbounded => true,
        }
    }
}

impl fmt::Display for MaxCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxCount::Bounded(max) => write!(f, "{max}"),
            MaxCount::Unbounded => write!(f, "*"),
        }
    }
}

/// One declared field of a FHIR type
///
/// # Examples
///
/// ```
/// use imis_fhir::model::property::{MaxCount, PropertyDescriptor, PropertyType};
///
/// const GIVEN: PropertyDescriptor = PropertyDescriptor::list("given", PropertyType::Str).max(2);
/// assert!(GIVEN.is_list());
/// assert_eq!(GIVEN.count_max(), MaxCount::Bounded(2));
/// assert!(GIVEN.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: PropertyType,
    count_min: u32,
    count_max: MaxCount,
    required: bool,
}

impl PropertyDescriptor {
    /// A `0..1` property
    pub const fn scalar(name: &'static str, kind: PropertyType) -> Self {
        Self {
            name,
            kind,
            count_min: 0,
            count_max: MaxCount::Bounded(1),
            required: false,
        }
    }

    /// A `0..*` property
    pub const fn list(name: &'static str, kind: PropertyType) -> Self {
        Self {
            name,
            kind,
            count_min: 0,
            count_max: MaxCount::Unbounded,
            required: false,
        }
    }

    /// Sets the upper bound
    pub const fn max(mut self, max: u32) -> Self {
        self.count_max = MaxCount::Bounded(max);
        self
    }

    /// Sets the lower bound
    pub const fn min(mut self, min: u32) -> Self {
        self.count_min = min;
        self
    }

    /// Marks the property as required, raising the lower bound to 1
    pub const fn required(mut self) -> Self {
        self.required = true;
        if self.count_min == 0 {
            self.count_min = 1;
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    pub fn count_min(&self) -> u32 {
        self.count_min
    }

    pub fn count_max(&self) -> MaxCount {
        self.count_max
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// List-valued when the upper bound exceeds one
    pub fn is_list(&self) -> bool {
        match self.count_max {
            MaxCount::Bounded(max) => max > 1,
            MaxCount::Unbounded => true,
        }
    }

    /// Checks the declaration invariants
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Schema`] for an empty name, a name containing
    /// whitespace, an upper bound of zero, or `count_min > count_max`.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(FhirError::Schema("property name cannot be empty".to_string()));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(FhirError::Schema(format!(
                "property shouldn't contain space in `{}`.",
                self.name
            )));
        }
        if let MaxCount::Bounded(max) = self.count_max {
            if max == 0 {
                return Err(FhirError::Schema(format!(
                    "property `{}` must allow at least one value",
                    self.name
                )));
            }
            if self.count_min > max {
                return Err(FhirError::Schema(format!(
                    "property `{}` has count_min {} greater than count_max {}",
                    self.name, self.count_min, max
                )));
            }
        }
        Ok(())
    }
}

/// Static definition of a FHIR type
#[derive(Debug)]
pub struct TypeDef {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub properties: &'static [PropertyDescriptor],
}

impl TypeDef {
    pub const fn new(
        name: &'static str,
        parent: Option<&'static str>,
        properties: &'static [PropertyDescriptor],
    ) -> Self {
        Self {
            name,
            parent,
            properties,
        }
    }
}
