//! Property values
//!
//! [`FhirValue`] is the tagged union stored in every object slot. Primitive
//! variants map one to one onto [`PropertyType`](super::property::PropertyType)
//! primitives, `Object` holds a nested element or resource, and `List` holds
//! the elements of a list-valued property.

use super::date::FhirDate;
use super::object::FhirObject;

#[derive(Debug, Clone, PartialEq)]
pub enum FhirValue {
    Str(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Date(FhirDate),
    Object(FhirObject),
    List(Vec<FhirValue>),
}

impl FhirValue {
    /// Name used in type error messages
    pub fn type_name(&self) -> &str {
        match self {
            FhirValue::Str(_) => "str",
            FhirValue::Integer(_) => "int",
            FhirValue::Decimal(_) => "float",
            FhirValue::Boolean(_) => "bool",
            FhirValue::Date(_) => "FHIRDate",
            FhirValue::Object(object) => object.type_name(),
            FhirValue::List(_) => "list",
        }
    }

    /// Empty string, zero, `false`, and empty lists are falsy
    ///
    /// Objects are never falsy here; the serializer decides on emptiness after
    /// rendering them.
    pub fn is_falsy(&self) -> bool {
        match self {
            FhirValue::Str(value) => value.is_empty(),
            FhirValue::Integer(value) => *value == 0,
            FhirValue::Decimal(value) => *value == 0.0,
            FhirValue::Boolean(value) => !value,
            FhirValue::Date(value) => value.as_str().is_empty(),
            FhirValue::Object(_) => false,
            FhirValue::List(items) => items.is_empty(),
        }
    }

    /// Text of a `Str` or `Date` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FhirValue::Str(value) => Some(value),
            FhirValue::Date(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FhirValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value of a `Decimal` or `Integer`
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            FhirValue::Decimal(value) => Some(*value),
            FhirValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FhirValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&FhirDate> {
        match self {
            FhirValue::Date(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FhirObject> {
        match self {
            FhirValue::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut FhirObject> {
        match self {
            FhirValue::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FhirValue]> {
        match self {
            FhirValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FhirValue {
    fn from(value: &str) -> Self {
        FhirValue::Str(value.to_string())
    }
}

impl From<String> for FhirValue {
    fn from(value: String) -> Self {
        FhirValue::Str(value)
    }
}

impl From<&String> for FhirValue {
    fn from(value: &String) -> Self {
        FhirValue::Str(value.clone())
    }
}

impl From<i64> for FhirValue {
    fn from(value: i64) -> Self {
        FhirValue::Integer(value)
    }
}

impl From<i32> for FhirValue {
    fn from(value: i32) -> Self {
        FhirValue::Integer(i64::from(value))
    }
}

impl From<f64> for FhirValue {
    fn from(value: f64) -> Self {
        FhirValue::Decimal(value)
    }
}

impl From<bool> for FhirValue {
    fn from(value: bool) -> Self {
        FhirValue::Boolean(value)
    }
}

impl From<FhirDate> for FhirValue {
    fn from(value: FhirDate) -> Self {
        FhirValue::Date(value)
    }
}

impl From<FhirObject> for FhirValue {
    fn from(value: FhirObject) -> Self {
        FhirValue::Object(value)
    }
}

impl<T: Into<FhirValue>> From<Vec<T>> for FhirValue {
    fn from(items: Vec<T>) -> Self {
        FhirValue::List(items.into_iter().map(Into::into).collect())
    }
}
