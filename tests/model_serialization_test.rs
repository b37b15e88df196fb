//! Integration tests for the FHIR object model and its JSON codec

use imis_fhir::domain::FhirError;
use imis_fhir::model::{FhirObject, FhirValue, FhirVersion};
use serde_json::{json, Value};
use test_case::test_case;

fn claim_document() -> Value {
    json!({
        "resourceType": "Claim",
        "id": "100",
        "identifier": [{
            "use": "usual",
            "type": {"coding": [{"system": "https://hl7.org/fhir/valueset-identifier-type.html", "code": "MR"}]},
            "value": "CLM-1"
        }],
        "created": "2024-01-15",
        "patient": {"reference": "Patient/12"},
        "billablePeriod": {"start": "2024-01-10", "end": "2024-01-12"},
        "diagnosis": [{
            "sequence": 1,
            "diagnosisCodeableConcept": {"coding": [{"code": "A01"}], "text": "Typhoid"},
            "type": [{"text": "icd_0"}]
        }],
        "total": {"value": 150.5, "currency": "USD"},
        "item": [{
            "sequence": 1,
            "category": {"text": "item"},
            "service": {"text": "PARA500"},
            "quantity": {"value": 2},
            "unitPrice": {"value": 10, "currency": "USD"}
        }]
    })
}

#[test]
fn test_claim_document_round_trip() {
    let document = claim_document();
    let claim = FhirObject::from_dict(FhirVersion::Stu3, "Claim", &document).unwrap();

    assert_eq!(claim.type_name(), "Claim");
    let total = claim.get_object("total").unwrap().unwrap();
    assert_eq!(total.get_decimal("value").unwrap(), Some(150.5));
    let item = claim.objects("item").unwrap()[0];
    assert_eq!(item.get_integer("sequence").unwrap(), Some(1));
    let unit_price = item.get_object("unitPrice").unwrap().unwrap();
    assert_eq!(unit_price.get_decimal("value").unwrap(), Some(10.0));

    let reparsed = FhirObject::from_json(FhirVersion::Stu3, "Claim", &claim.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, claim);
}

#[test]
fn test_resource_base_resolves_concrete_type() {
    let claim = FhirObject::from_dict(FhirVersion::Stu3, "DomainResource", &claim_document()).unwrap();
    assert_eq!(claim.type_name(), "Claim");
    assert!(claim.schema().is_subtype_of("Resource"));
}

#[test_case(json!({"id": "1"}); "missing resource type")]
#[test_case(json!({"resourceType": 3}); "non string resource type")]
#[test_case(json!({"resourceType": "Spaceship"}); "unknown resource type")]
#[test_case(json!({"resourceType": "Location"}); "not a subtype")]
#[test_case(json!({"resourceType": "CodeableConcept"}); "datatype is not a resource")]
#[test_case(json!(["Claim"]); "not an object")]
fn test_malformed_documents_fail_marshalling(document: Value) {
    let err = FhirObject::from_dict(FhirVersion::Stu3, "Claim", &document).unwrap_err();
    assert!(matches!(err, FhirError::Marshalling(_)), "got {err:?}");
}

#[test]
fn test_unknown_attribute() {
    let document = json!({"resourceType": "Patient", "favouriteColour": "blue"});
    let err = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &document).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The attribute named `favouriteColour` is not a valid property for `Patient`."
    );
}

#[test]
fn test_cardinality_shape_enforced_while_decoding() {
    let list_for_scalar = json!({"resourceType": "Patient", "gender": ["female"]});
    let err = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &list_for_scalar).unwrap_err();
    assert!(matches!(err, FhirError::Property(_)));

    let mut patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
    let err = patient.set("name", FhirValue::Str("Doe".to_string())).unwrap_err();
    assert!(matches!(err, FhirError::Property(_)));
    assert!(patient.append("gender", "female").is_err());
}

#[test]
fn test_location_type_shape_differs_by_version() {
    let stu3 = json!({"resourceType": "Location", "type": {"text": "hospital"}});
    assert!(FhirObject::from_dict(FhirVersion::Stu3, "Location", &stu3).is_ok());
    assert!(FhirObject::from_dict(FhirVersion::R4, "Location", &stu3).is_err());

    let r4 = json!({"resourceType": "Location", "type": [{"text": "hospital"}]});
    let location = FhirObject::from_dict(FhirVersion::R4, "Location", &r4).unwrap();
    assert_eq!(location.objects("type").unwrap().len(), 1);
}

#[test]
fn test_claim_response_total_only_in_r4() {
    let document = json!({
        "resourceType": "ClaimResponse",
        "total": [{
            "category": {"coding": [{"code": "approved"}]},
            "amount": {"value": 100.0, "currency": "USD"}
        }]
    });
    assert!(FhirObject::from_dict(FhirVersion::R4, "ClaimResponse", &document).is_ok());
    let err = FhirObject::from_dict(FhirVersion::Stu3, "ClaimResponse", &document).unwrap_err();
    assert!(matches!(err, FhirError::InvalidAttribute { .. }));
}

#[test]
fn test_required_component_checked_on_encode() {
    let mut response = FhirObject::create(FhirVersion::R4, "ClaimResponse").unwrap();
    let total = FhirObject::create(FhirVersion::R4, "ClaimResponseTotal").unwrap();
    response.append("total", total).unwrap();

    let err = response.to_dict().unwrap_err();
    assert!(matches!(err, FhirError::RequestProcess(_)));
}

#[test]
fn test_claim_item_service_renamed_in_r4() {
    let stu3_item = json!({
        "resourceType": "Claim",
        "item": [{"sequence": 1, "service": {"text": "PARA500"}}]
    });
    let r4_item = json!({
        "resourceType": "Claim",
        "item": [{"sequence": 1, "productOrService": {"text": "PARA500"}}]
    });

    assert!(FhirObject::from_dict(FhirVersion::Stu3, "Claim", &stu3_item).is_ok());
    assert!(matches!(
        FhirObject::from_dict(FhirVersion::R4, "Claim", &stu3_item),
        Err(FhirError::InvalidAttribute { .. })
    ));
    assert!(FhirObject::from_dict(FhirVersion::R4, "Claim", &r4_item).is_ok());
    assert!(matches!(
        FhirObject::from_dict(FhirVersion::Stu3, "Claim", &r4_item),
        Err(FhirError::InvalidAttribute { .. })
    ));
}

#[test_case("xml")]
#[test_case("JSON")]
fn test_only_json_format(format: &str) {
    let patient = FhirObject::create(FhirVersion::Stu3, "Patient").unwrap();
    assert!(matches!(
        patient.dumps(format),
        Err(FhirError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        FhirObject::loads(FhirVersion::Stu3, "Patient", "{}", format),
        Err(FhirError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_invalid_date_rejected() {
    let document = json!({"resourceType": "Patient", "birthDate": "24/03/1990"});
    assert!(FhirObject::from_dict(FhirVersion::Stu3, "Patient", &document).is_err());
}
