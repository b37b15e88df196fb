//! Validated FHIR objects
//!
//! A [`FhirObject`] is an instance of one registered type. Every read and write
//! goes through the type's [`Schema`], so an object can only ever hold declared
//! properties with values of the declared kind and cardinality.
//!
//! Objects may be built incrementally: required properties are only enforced
//! when the object is serialized (see [`FhirObject::check_required`]).

use super::date::FhirDate;
use super::property::{PropertyDescriptor, PropertyType};
use super::registry::{FhirVersion, Registry, Schema};
use super::value::FhirValue;
use crate::domain::{FhirError, Result};
use std::collections::HashMap;

/// Instance of a registered FHIR element or resource type
///
/// # Examples
///
/// ```
/// use imis_fhir::model::{FhirObject, FhirVersion};
///
/// let mut name = FhirObject::create(FhirVersion::Stu3, "HumanName").unwrap();
/// name.set("family", "Doe").unwrap();
/// name.append("given", "Jane").unwrap();
///
/// let mut patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
/// patient.append("name", name).unwrap();
/// assert_eq!(patient.list("name").unwrap().len(), 1);
/// assert!(patient.set("nickname", "JD").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FhirObject {
    schema: &'static Schema,
    values: HashMap<&'static str, FhirValue>,
}

impl FhirObject {
    /// Creates an empty object of a resolved type
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    /// Creates an empty object of type `name` in `version`
    pub fn create(version: FhirVersion, name: &str) -> Result<Self> {
        Registry::create(version, name)
    }

    /// Creates an empty object of another type in the same version
    pub fn sibling(&self, name: &str) -> Result<Self> {
        Self::create(self.version(), name)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn type_name(&self) -> &'static str {
        self.schema.name()
    }

    pub fn version(&self) -> FhirVersion {
        self.schema.version()
    }

    pub fn is_resource(&self) -> bool {
        self.schema.is_resource()
    }

    /// True when no property holds a value
    pub fn is_empty(&self) -> bool {
        self.values
            .values()
            .all(|value| matches!(value, FhirValue::List(items) if items.is_empty()))
    }

    fn descriptor(&self, name: &str) -> Result<&'static PropertyDescriptor> {
        self.schema
            .property(name)
            .ok_or_else(|| FhirError::InvalidAttribute {
                attribute: name.to_string(),
                type_name: self.type_name().to_string(),
            })
    }

    /// Reads a property, materializing an empty list for list properties
    pub fn get(&mut self, name: &str) -> Result<Option<&FhirValue>> {
        let descriptor = self.descriptor(name)?;
        if descriptor.is_list() {
            let value: &FhirValue = self
                .values
                .entry(descriptor.name())
                .or_insert_with(|| FhirValue::List(Vec::new()));
            Ok(Some(value))
        } else {
            Ok(self.values.get(descriptor.name()))
        }
    }

    /// Reads a property without materializing anything
    pub fn value(&self, name: &str) -> Result<Option<&FhirValue>> {
        let descriptor = self.descriptor(name)?;
        Ok(self.values.get(descriptor.name()))
    }

    /// Elements of a list property, empty when never written
    pub fn list(&self, name: &str) -> Result<&[FhirValue]> {
        let descriptor = self.descriptor(name)?;
        if !descriptor.is_list() {
            return Err(FhirError::Property(format!(
                "The property {name} is not a list"
            )));
        }
        Ok(self
            .values
            .get(descriptor.name())
            .and_then(FhirValue::as_list)
            .unwrap_or_default())
    }

    /// Replaces the value of a property
    ///
    /// List properties take a [`FhirValue::List`] whose previous contents are
    /// fully replaced; scalar properties reject lists.
    pub fn set(&mut self, name: &str, value: impl Into<FhirValue>) -> Result<()> {
        self.assign(name, Some(value.into()))
    }

    /// Like [`FhirObject::set`], clearing the property on `None`
    ///
    /// # Errors
    ///
    /// `None` on a required property is a [`FhirError::Property`] error.
    pub fn set_opt<V: Into<FhirValue>>(&mut self, name: &str, value: Option<V>) -> Result<()> {
        self.assign(name, value.map(Into::into))
    }

    fn assign(&mut self, name: &str, value: Option<FhirValue>) -> Result<()> {
        let descriptor = self.descriptor(name)?;
        match value {
            None => {
                if descriptor.is_required() {
                    return Err(FhirError::Property(format!(
                        "The value of property {name} can't be none"
                    )));
                }
                self.values.remove(descriptor.name());
            }
            Some(FhirValue::List(items)) => {
                if !descriptor.is_list() {
                    return Err(FhirError::Property(format!(
                        "The value of property {name} shouldn't be a list"
                    )));
                }
                if !descriptor.count_max().fits(items.len()) {
                    return Err(max_size_error(descriptor));
                }
                let items = items
                    .into_iter()
                    .map(|item| check_value(self.version(), descriptor, item))
                    .collect::<Result<Vec<_>>>()?;
                self.values.insert(descriptor.name(), FhirValue::List(items));
            }
            Some(value) => {
                if descriptor.is_list() {
                    return Err(FhirError::Property(format!(
                        "The value of property {name} need to be a list"
                    )));
                }
                let value = check_value(self.version(), descriptor, value)?;
                self.values.insert(descriptor.name(), value);
            }
        }
        Ok(())
    }

    /// Appends one element to a list property
    pub fn append(&mut self, name: &str, value: impl Into<FhirValue>) -> Result<()> {
        let len = self.list(name)?.len();
        self.insert(name, len, value)
    }

    /// Inserts one element into a list property; indexes past the end append
    pub fn insert(&mut self, name: &str, index: usize, value: impl Into<FhirValue>) -> Result<()> {
        let descriptor = self.descriptor(name)?;
        if !descriptor.is_list() {
            return Err(FhirError::Property(format!(
                "The property {name} is not a list"
            )));
        }
        let value = check_value(self.version(), descriptor, value.into())?;
        let items = match self
            .values
            .entry(descriptor.name())
            .or_insert_with(|| FhirValue::List(Vec::new()))
        {
            FhirValue::List(items) => items,
            other => {
                return Err(FhirError::Property(format!(
                    "The value of property {name} need to be a list, found {}",
                    other.type_name()
                )))
            }
        };
        if !descriptor.count_max().admits_another(items.len()) {
            return Err(max_size_error(descriptor));
        }
        let index = index.min(items.len());
        items.insert(index, value);
        Ok(())
    }

    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.value(name)?.and_then(FhirValue::as_str))
    }

    pub fn get_integer(&self, name: &str) -> Result<Option<i64>> {
        Ok(self.value(name)?.and_then(FhirValue::as_integer))
    }

    pub fn get_decimal(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.value(name)?.and_then(FhirValue::as_decimal))
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        Ok(self.value(name)?.and_then(FhirValue::as_bool))
    }

    pub fn get_date(&self, name: &str) -> Result<Option<&FhirDate>> {
        Ok(self.value(name)?.and_then(FhirValue::as_date))
    }

    pub fn get_object(&self, name: &str) -> Result<Option<&FhirObject>> {
        Ok(self.value(name)?.and_then(FhirValue::as_object))
    }

    /// Object elements of a list property
    pub fn objects(&self, name: &str) -> Result<Vec<&FhirObject>> {
        Ok(self.list(name)?.iter().filter_map(FhirValue::as_object).collect())
    }

    /// String elements of a list property
    pub fn strings(&self, name: &str) -> Result<Vec<&str>> {
        Ok(self.list(name)?.iter().filter_map(FhirValue::as_str).collect())
    }

    /// Stored value of each declared property, in declaration order
    pub(crate) fn declared_values(
        &self,
    ) -> impl Iterator<Item = (&'static PropertyDescriptor, Option<&FhirValue>)> + '_ {
        self.schema
            .properties()
            .iter()
            .map(move |descriptor| (*descriptor, self.values.get(descriptor.name())))
    }

    /// Checks that every required property holds a value, recursively
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::RequestProcess`] with one message per missing
    /// property, each naming the owning type and the property.
    pub fn check_required(&self) -> Result<()> {
        let mut missing = Vec::new();
        self.collect_missing(&mut missing);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FhirError::RequestProcess(missing))
        }
    }

    fn collect_missing(&self, missing: &mut Vec<String>) {
        for (descriptor, value) in self.declared_values() {
            let present = match value {
                None => false,
                Some(FhirValue::List(items)) => items.len() >= descriptor.count_min() as usize,
                Some(_) => true,
            };
            if descriptor.is_required() && !present {
                missing.push(format!(
                    "Missing required property `{}` of `{}`",
                    descriptor.name(),
                    self.type_name()
                ));
            }
            match value {
                Some(FhirValue::Object(object)) => object.collect_missing(missing),
                Some(FhirValue::List(items)) => {
                    for object in items.iter().filter_map(FhirValue::as_object) {
                        object.collect_missing(missing);
                    }
                }
                _ => {}
            }
        }
    }
}

impl PartialEq for FhirObject {
    /// Objects are equal when they have the same type and the same values;
    /// an empty list equals an absent one.
    fn eq(&self, other: &Self) -> bool {
        fn normalized(value: Option<&FhirValue>) -> Option<&FhirValue> {
            value.filter(|v| !matches!(v, FhirValue::List(items) if items.is_empty()))
        }
        self.type_name() == other.type_name()
            && self.version() == other.version()
            && self.schema.properties().iter().all(|descriptor| {
                normalized(self.values.get(descriptor.name()))
                    == normalized(other.values.get(descriptor.name()))
            })
    }
}

fn max_size_error(descriptor: &PropertyDescriptor) -> FhirError {
    FhirError::PropertyMaxSize {
        property: descriptor.name().to_string(),
        min: descriptor.count_min(),
        max: descriptor.count_max().to_string(),
    }
}

/// Validates one element against the declared kind, widening or parsing
/// where the kind allows it
///
/// Nested objects must belong to the owner's `version`.
fn check_value(
    version: FhirVersion,
    descriptor: &PropertyDescriptor,
    value: FhirValue,
) -> Result<FhirValue> {
    let checked = match (descriptor.kind(), value) {
        (PropertyType::Str, value @ FhirValue::Str(_))
        | (PropertyType::Integer, value @ FhirValue::Integer(_))
        | (PropertyType::Decimal, value @ FhirValue::Decimal(_))
        | (PropertyType::Boolean, value @ FhirValue::Boolean(_))
        | (PropertyType::Date, value @ FhirValue::Date(_)) => value,
        (PropertyType::Decimal, FhirValue::Integer(number)) => FhirValue::Decimal(number as f64),
        (PropertyType::Date, FhirValue::Str(text)) => FhirValue::Date(FhirDate::new(text)?),
        (PropertyType::Named(_), FhirValue::Object(object)) if object.version() != version => {
            return Err(type_error(
                descriptor,
                &format!("{} {}", object.version(), object.type_name()),
            ));
        }
        (PropertyType::Named(expected), FhirValue::Object(object)) => {
            let accepted = object.type_name() == expected
                || (object.is_resource() && object.schema().is_subtype_of(expected));
            if !accepted {
                return Err(type_error(descriptor, object.type_name()));
            }
            FhirValue::Object(object)
        }
        (_, other) => return Err(type_error(descriptor, other.type_name())),
    };
    Ok(checked)
}

fn type_error(descriptor: &PropertyDescriptor, actual: &str) -> FhirError {
    FhirError::PropertyType {
        expected: descriptor.kind().name().to_string(),
        actual: actual.to_string(),
        property: descriptor.name().to_string(),
    }
}
