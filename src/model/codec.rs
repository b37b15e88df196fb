//! JSON encoding and decoding of FHIR objects
//!
//! Encoding walks the declared properties in order and produces a sparse
//! document: absent values, falsy scalars, empty nested objects and empty
//! lists are left out. Resources get a leading `resourceType` key.
//!
//! Decoding starts from a resource document, picks the concrete type from its
//! `resourceType`, checks it against the type the caller asked for, and then
//! populates properties recursively. Nested resources (such as `contained`)
//! are resolved from their own `resourceType`.
//!
//! ```
//! use imis_fhir::model::{FhirObject, FhirVersion};
//!
//! let text = r#"{"resourceType": "Patient", "gender": "female", "birthDate": "1990-03-24"}"#;
//! let patient = FhirObject::from_json(FhirVersion::Stu3, "Resource", text).unwrap();
//! assert_eq!(patient.type_name(), "Patient");
//!
//! let round_trip = FhirObject::from_json(FhirVersion::Stu3, "Patient", &patient.to_json().unwrap()).unwrap();
//! assert_eq!(round_trip, patient);
//! ```

use super::date::FhirDate;
use super::object::FhirObject;
use super::property::{PropertyDescriptor, PropertyType};
use super::registry::{FhirVersion, Registry};
use super::value::FhirValue;
use crate::domain::{FhirError, Result};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Discriminator key of resource documents
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// Serialization formats understood by `loads` / `dumps`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
}

impl FromStr for Format {
    type Err = FhirError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            other => Err(FhirError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
        }
    }
}

impl FhirObject {
    /// Sparse ordered document of this object
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::RequestProcess`] if a required property, here or in
    /// a nested object, holds no value.
    pub fn to_dict(&self) -> Result<Map<String, Value>> {
        self.check_required()?;
        Ok(self.render())
    }

    fn render(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        if self.is_resource() {
            dict.insert(
                RESOURCE_TYPE_KEY.to_string(),
                Value::String(self.type_name().to_string()),
            );
        }
        for (descriptor, value) in self.declared_values() {
            let Some(value) = value else { continue };
            if value.is_falsy() {
                continue;
            }
            let rendered = match value {
                FhirValue::List(items) => Value::Array(items.iter().map(render_value).collect()),
                FhirValue::Object(object) => {
                    let nested = object.render();
                    if nested.is_empty() {
                        continue;
                    }
                    Value::Object(nested)
                }
                scalar => render_value(scalar),
            };
            dict.insert(descriptor.name().to_string(), rendered);
        }
        dict
    }

    /// Pretty-printed JSON text with a two-space indent
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Value::Object(self.to_dict()?))?)
    }

    /// Serializes to `format`; only `"json"` is supported
    pub fn dumps(&self, format: &str) -> Result<String> {
        match format.parse::<Format>()? {
            Format::Json => self.to_json(),
        }
    }

    /// Builds a resource from a parsed document
    ///
    /// `expected` names the type the caller wants; the document's
    /// `resourceType` may name it or any of its subtypes.
    ///
    /// # Errors
    ///
    /// [`FhirError::Marshalling`] for a non-object document, a missing or
    /// unknown `resourceType`, or an incompatible type. Property errors from
    /// population are returned unchanged.
    pub fn from_dict(version: FhirVersion, expected: &str, document: &Value) -> Result<Self> {
        let registry = Registry::get(version)?;
        registry.resolve(expected)?;

        let map = document.as_object().ok_or_else(|| {
            FhirError::Marshalling(format!(
                "Expected a JSON object to build a `{expected}`, got {}",
                json_kind(document)
            ))
        })?;
        let resource_type = map
            .get(RESOURCE_TYPE_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                FhirError::Marshalling(format!(
                    "Missing `{RESOURCE_TYPE_KEY}` attribute to build a `{expected}`"
                ))
            })?;
        let schema = registry.find(resource_type).ok_or_else(|| {
            FhirError::Marshalling(format!("Unknown resourceType `{resource_type}`"))
        })?;
        if !schema.is_resource() || !schema.is_subtype_of(expected) {
            return Err(FhirError::Marshalling(format!(
                "Cannot marshall a `{resource_type}` from a `{expected}`: not a subclass!"
            )));
        }

        let mut object = FhirObject::new(schema);
        object.populate(map)?;
        Ok(object)
    }

    /// Parses JSON text and builds a resource from it
    pub fn from_json(version: FhirVersion, expected: &str, text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_dict(version, expected, &document)
    }

    /// Parses text in `format`; only `"json"` is supported
    pub fn loads(version: FhirVersion, expected: &str, text: &str, format: &str) -> Result<Self> {
        match format.parse::<Format>()? {
            Format::Json => Self::from_json(version, expected, text),
        }
    }

    fn populate(&mut self, map: &Map<String, Value>) -> Result<()> {
        for (key, json) in map {
            if key == RESOURCE_TYPE_KEY && self.is_resource() {
                continue;
            }
            let descriptor = self
                .schema()
                .property(key)
                .ok_or_else(|| FhirError::InvalidAttribute {
                    attribute: key.clone(),
                    type_name: self.type_name().to_string(),
                })?;
            let value = match json {
                Value::Null => None,
                Value::Array(items) => Some(FhirValue::List(
                    items
                        .iter()
                        .map(|item| self.decode_element(descriptor, item))
                        .collect::<Result<Vec<_>>>()?,
                )),
                other => Some(self.decode_element(descriptor, other)?),
            };
            self.set_opt(key, value)?;
        }
        Ok(())
    }

    fn decode_element(&self, descriptor: &PropertyDescriptor, json: &Value) -> Result<FhirValue> {
        let mismatch = || FhirError::PropertyType {
            expected: descriptor.kind().name().to_string(),
            actual: json_kind(json).to_string(),
            property: descriptor.name().to_string(),
        };
        let value = match descriptor.kind() {
            PropertyType::Str => FhirValue::Str(json.as_str().ok_or_else(mismatch)?.to_string()),
            PropertyType::Integer => FhirValue::Integer(json.as_i64().ok_or_else(mismatch)?),
            PropertyType::Decimal => FhirValue::Decimal(json.as_f64().ok_or_else(mismatch)?),
            PropertyType::Boolean => FhirValue::Boolean(json.as_bool().ok_or_else(mismatch)?),
            PropertyType::Date => FhirValue::Date(FhirDate::new(json.as_str().ok_or_else(mismatch)?)?),
            PropertyType::Named(type_name) => {
                let schema = Registry::get(self.version())?.resolve(type_name)?;
                if schema.is_resource() {
                    FhirValue::Object(FhirObject::from_dict(self.version(), type_name, json)?)
                } else {
                    let map = json.as_object().ok_or_else(mismatch)?;
                    let mut nested = FhirObject::new(schema);
                    nested.populate(map)?;
                    FhirValue::Object(nested)
                }
            }
        };
        Ok(value)
    }
}

fn render_value(value: &FhirValue) -> Value {
    match value {
        FhirValue::Str(text) => Value::String(text.clone()),
        FhirValue::Integer(number) => Value::Number(Number::from(*number)),
        FhirValue::Decimal(number) => Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        FhirValue::Boolean(flag) => Value::Bool(*flag),
        FhirValue::Date(date) => Value::String(date.as_str().to_string()),
        FhirValue::Object(object) => Value::Object(object.render()),
        FhirValue::List(items) => Value::Array(items.iter().map(render_value).collect()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patient_document() -> Value {
        json!({
            "resourceType": "Patient",
            "identifier": [{
                "use": "usual",
                "type": {"coding": [{"system": "https://hl7.org/fhir/valueset-identifier-type.html", "code": "SB"}]},
                "value": "CHF123"
            }],
            "name": [{"use": "usual", "family": "Doe", "given": ["Jane"]}],
            "gender": "female",
            "birthDate": "1990-03-24"
        })
    }

    #[test]
    fn test_to_dict_orders_and_prefixes_resource_type() {
        let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &patient_document()).unwrap();
        let dict = patient.to_dict().unwrap();
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["resourceType", "identifier", "name", "gender", "birthDate"]);
    }

    #[test]
    fn test_falsy_values_omitted() {
        let mut patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
        patient.set("active", false).unwrap();
        patient.set("gender", "").unwrap();
        patient.get("name").unwrap();
        let marital = patient.sibling("CodeableConcept").unwrap();
        patient.set("maritalStatus", marital).unwrap();
        let dict = patient.to_dict().unwrap();
        assert_eq!(Value::Object(dict), json!({"resourceType": "Patient"}));
    }

    #[test]
    fn test_to_json_is_indented() {
        let mut patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
        patient.set("gender", "male").unwrap();
        assert_eq!(
            patient.to_json().unwrap(),
            "{\n  \"resourceType\": \"Patient\",\n  \"gender\": \"male\"\n}"
        );
    }

    #[test]
    fn test_round_trip_preserves_object() {
        let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &patient_document()).unwrap();
        let text = patient.dumps("json").unwrap();
        let decoded = FhirObject::loads(FhirVersion::Stu3, "Patient", &text, "json").unwrap();
        assert_eq!(decoded, patient);
        assert_eq!(Value::Object(decoded.to_dict().unwrap()), patient_document());
    }

    #[test]
    fn test_missing_resource_type() {
        let err = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &json!({"gender": "male"})).unwrap_err();
        assert!(matches!(err, FhirError::Marshalling(_)));
    }

    #[test]
    fn test_incompatible_resource_type() {
        let err = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &json!({"resourceType": "Location"}))
            .unwrap_err();
        assert!(matches!(err, FhirError::Marshalling(_)));
        assert!(err.to_string().contains("not a subclass"));

        let err = FhirObject::from_dict(FhirVersion::Stu3, "Resource", &json!({"resourceType": "Patients"}))
            .unwrap_err();
        assert!(matches!(err, FhirError::Marshalling(_)));

        let err = FhirObject::from_dict(FhirVersion::Stu3, "Resource", &json!({"resourceType": "Coding"}))
            .unwrap_err();
        assert!(matches!(err, FhirError::Marshalling(_)));
    }

    #[test]
    fn test_non_object_document() {
        let err = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &json!([1, 2])).unwrap_err();
        assert!(matches!(err, FhirError::Marshalling(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = FhirObject::from_dict(
            FhirVersion::Stu3,
            "Patient",
            &json!({"resourceType": "Patient", "nickname": "JD"}),
        )
        .unwrap_err();
        assert!(matches!(err, FhirError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_nested_resources_are_polymorphic() {
        let document = json!({
            "resourceType": "Patient",
            "contained": [{"resourceType": "Location", "name": "Central"}]
        });
        let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &document).unwrap();
        let contained = patient.objects("contained").unwrap();
        assert_eq!(contained[0].type_name(), "Location");
        assert_eq!(contained[0].get_str("name").unwrap(), Some("Central"));
    }

    #[test]
    fn test_primitive_type_mismatch() {
        let err = FhirObject::from_dict(
            FhirVersion::Stu3,
            "Patient",
            &json!({"resourceType": "Patient", "active": "yes"}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Expected 'bool' but got 'str' for 'active' property");
    }

    #[test]
    fn test_unsupported_format() {
        let patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
        assert!(matches!(patient.dumps("xml"), Err(FhirError::UnsupportedFormat(_))));
        assert!(matches!(
            FhirObject::loads(FhirVersion::Stu3, "Patient", "{}", "yaml"),
            Err(FhirError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_required_enforced_on_serialization() {
        let mut outcome = FhirObject::create(FhirVersion::R4, "OperationOutcome").unwrap();
        let mut issue = outcome.sibling("OperationOutcomeIssue").unwrap();
        issue.set("severity", "error").unwrap();
        outcome.append("issue", issue).unwrap();
        let err = outcome.to_json().unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.issues()[0].contains("`code`"));
    }
}
