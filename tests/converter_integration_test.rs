//! End-to-end conversion tests: FHIR JSON documents in, domain records out,
//! and back again

use chrono::NaiveDate;
use imis_fhir::adapters::InMemoryRepository;
use imis_fhir::config::{FhirConfig, IdentifierConfig};
use imis_fhir::converters::common::{build_fhir_identifier, find_identifier_value, first_coding};
use imis_fhir::converters::{
    ActivityDefinitionConverter, ClaimResponseConverter, CommunicationRequestConverter,
    ConversionContext, FhirConverter, LocationConverter, OperationOutcomeConverter,
    PatientConverter, PractitionerConverter, ReferenceConverter,
};
use imis_fhir::domain::{
    AuditUser, Claim, ClaimAdmin, Feedback, FhirError, HealthFacility, Insuree,
    CLAIM_STATUS_CHECKED, CLAIM_STATUS_ENTERED, CLAIM_STATUS_PROCESSED, CLAIM_STATUS_REJECTED,
    CLAIM_STATUS_VALUATED, HF_LEVEL_HOSPITAL,
};
use imis_fhir::model::{FhirObject, FhirVersion};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;
use test_case::test_case;

const IDENTIFIER_SYSTEM: &str = "https://hl7.org/fhir/valueset-identifier-type.html";

fn identifier(code: &str, value: &str) -> Value {
    json!({
        "use": "usual",
        "type": {"coding": [{"system": IDENTIFIER_SYSTEM, "code": code}]},
        "value": value
    })
}

fn patient_document() -> Value {
    json!({
        "resourceType": "Patient",
        "identifier": [identifier("SB", "CHF123")],
        "name": [{"use": "usual", "family": "Doe", "given": ["Jane"]}],
        "birthDate": "1990-03-24",
        "gender": "female",
        "maritalStatus": {
            "coding": [{"system": "http://hl7.org/fhir/v3/MaritalStatus", "code": "M"}]
        }
    })
}

fn admin() -> AuditUser {
    AuditUser::new("admin", 7)
}

#[test_case(FhirVersion::Stu3)]
#[test_case(FhirVersion::R4)]
fn test_patient_document_to_insuree(version: FhirVersion) {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(version, &config, &repository);

    let patient = FhirObject::from_dict(version, "Patient", &patient_document()).unwrap();
    let insuree = PatientConverter::to_imis_obj(&ctx, &patient, Some(&admin())).unwrap();

    assert_eq!(insuree.last_name.as_deref(), Some("Doe"));
    assert_eq!(insuree.other_names.as_deref(), Some("Jane"));
    assert_eq!(insuree.chf_id.as_deref(), Some("CHF123"));
    assert_eq!(insuree.dob, NaiveDate::from_ymd_opt(1990, 3, 24));
    assert_eq!(insuree.gender.as_deref(), Some("F"));
    assert_eq!(insuree.marital.as_deref(), Some("M"));
    assert_eq!(insuree.audit_user_id, Some(7));
}

#[test]
fn test_patient_validation_errors_collected() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let document = json!({"resourceType": "Patient", "gender": "male"});

    let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &document).unwrap();
    let err = PatientConverter::to_imis_obj(&ctx, &patient, Some(&admin())).unwrap_err();

    match &err {
        FhirError::RequestProcess(messages) => assert_eq!(
            messages,
            &[
                "Missing patient `name` attribute",
                "Missing patient family name",
                "Missing patient given name",
                "Missing patient `birthDate` attribute",
            ]
        ),
        other => panic!("unexpected error {other:?}"),
    }

    let outcome = OperationOutcomeConverter::from_error(&ctx, &err).unwrap();
    let rendered = Value::Object(outcome.to_dict().unwrap());
    assert_eq!(rendered["issue"][0]["severity"], "error");
    assert_eq!(rendered["issue"][0]["code"], "exception");
    let details = rendered["issue"][0]["details"]["text"].as_str().unwrap();
    assert!(details.contains("Missing patient `name` attribute,\nMissing patient family name"));
}

#[test]
fn test_unauthenticated_inbound_conversion() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &patient_document()).unwrap();

    let err = PatientConverter::to_imis_obj(&ctx, &patient, None).unwrap_err();
    assert_eq!(err.to_string(), "Authentication credentials were not provided.");
}

#[test]
fn test_patient_json_round_trip_r4() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
    let insuree = Insuree {
        id: Some(12),
        chf_id: Some("CHF123".to_string()),
        passport: Some("P-998".to_string()),
        last_name: Some("Doe".to_string()),
        other_names: Some("Jane".to_string()),
        dob: NaiveDate::from_ymd_opt(1990, 3, 24),
        gender: Some("F".to_string()),
        email: Some("jane@example.org".to_string()),
        ..Default::default()
    };

    let json = PatientConverter::to_fhir_obj(&ctx, &insuree)
        .unwrap()
        .to_json()
        .unwrap();
    let patient = FhirObject::from_json(FhirVersion::R4, "Patient", &json).unwrap();
    let decoded = PatientConverter::to_imis_obj(&ctx, &patient, Some(&admin())).unwrap();

    assert_eq!(decoded.chf_id, insuree.chf_id);
    assert_eq!(decoded.passport, insuree.passport);
    assert_eq!(decoded.email, insuree.email);
    assert_eq!(decoded.dob, insuree.dob);
}

#[test_case(|codes: &IdentifierConfig| codes.id_type_code.clone(), "12"; "database id")]
#[test_case(|codes: &IdentifierConfig| codes.chfid_type_code.clone(), "CHF123"; "social benefit id")]
#[test_case(|codes: &IdentifierConfig| codes.passport_type_code.clone(), "P-998"; "passport")]
#[test_case(|codes: &IdentifierConfig| codes.facility_id_type.clone(), "HF001"; "facility id")]
#[test_case(|codes: &IdentifierConfig| codes.claim_code_type.clone(), "CLM-1"; "claim code")]
#[test_case(|codes: &IdentifierConfig| codes.claim_admin_code_type.clone(), "CA-01"; "claim admin code")]
fn test_identifier_kind_round_trip(type_code: fn(&IdentifierConfig) -> String, value: &str) {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let code = type_code(&config.identifier);

    let mut resource = ctx.new_object("Patient").unwrap();
    resource
        .append("identifier", build_fhir_identifier(&ctx, "decoy", "XX").unwrap())
        .unwrap();
    resource
        .append("identifier", build_fhir_identifier(&ctx, value, &code).unwrap())
        .unwrap();

    let json = resource.to_json().unwrap();
    let decoded = FhirObject::from_json(FhirVersion::Stu3, "Patient", &json).unwrap();
    assert_eq!(find_identifier_value(&ctx, &decoded, &code).unwrap(), Some(value));
}

#[test]
fn test_facility_round_trip_stu3() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let facility = HealthFacility {
        id: Some(3),
        code: Some("HF001".to_string()),
        name: Some("Central Hospital".to_string()),
        level: Some(HF_LEVEL_HOSPITAL.to_string()),
        phone: Some("+255 22 000 000".to_string()),
        ..Default::default()
    };

    let location = LocationConverter::to_fhir_obj(&ctx, &facility).unwrap();
    let document = Value::Object(location.to_dict().unwrap());
    assert!(document["type"].is_object());

    let decoded = LocationConverter::to_imis_obj(&ctx, &location, Some(&admin())).unwrap();
    assert_eq!(decoded.code.as_deref(), Some("HF001"));
    assert_eq!(decoded.name.as_deref(), Some("Central Hospital"));
    assert_eq!(decoded.level.as_deref(), Some(HF_LEVEL_HOSPITAL));
    assert_eq!(decoded.phone, facility.phone);
}

#[test]
fn test_facility_type_is_a_list_in_r4() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
    let facility = HealthFacility {
        code: Some("HF001".to_string()),
        name: Some("Central Hospital".to_string()),
        level: Some(HF_LEVEL_HOSPITAL.to_string()),
        ..Default::default()
    };

    let location = LocationConverter::to_fhir_obj(&ctx, &facility).unwrap();
    let document = Value::Object(location.to_dict().unwrap());
    assert_eq!(document["type"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_claim_admin_round_trip() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let claim_admin = ClaimAdmin {
        code: Some("CA-01".to_string()),
        last_name: Some("Mwita".to_string()),
        other_names: Some("Asha".to_string()),
        ..Default::default()
    };

    let practitioner = PractitionerConverter::to_fhir_obj(&ctx, &claim_admin).unwrap();
    let decoded = PractitionerConverter::to_imis_obj(&ctx, &practitioner, None).unwrap();
    assert_eq!(decoded.code.as_deref(), Some("CA-01"));
    assert_eq!(decoded.last_name.as_deref(), Some("Mwita"));
    assert_eq!(decoded.other_names.as_deref(), Some("Asha"));
    assert_eq!(
        decoded.audit_user_id,
        Some(config.general.default_audit_user_id)
    );
}

#[test]
fn test_wrong_resource_type_rejected() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let patient = FhirObject::from_dict(FhirVersion::Stu3, "Patient", &patient_document()).unwrap();

    let err = PractitionerConverter::to_imis_obj(&ctx, &patient, Some(&admin())).unwrap_err();
    assert!(matches!(err, FhirError::Marshalling(_)));
}

#[test_case(CLAIM_STATUS_REJECTED, "rejected")]
#[test_case(CLAIM_STATUS_ENTERED, "entered")]
#[test_case(CLAIM_STATUS_CHECKED, "checked")]
#[test_case(CLAIM_STATUS_PROCESSED, "processed")]
#[test_case(CLAIM_STATUS_VALUATED, "valuated")]
fn test_claim_status_outcome_both_versions(status: i32, display: &str) {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let claim = Claim {
        code: Some("CLM-1".to_string()),
        status: Some(status),
        ..Default::default()
    };

    for version in [FhirVersion::Stu3, FhirVersion::R4] {
        let ctx = ConversionContext::new(version, &config, &repository);
        let response = ClaimResponseConverter::to_fhir_obj(&ctx, &claim).unwrap();
        let outcome = response.get_object("outcome").unwrap().unwrap();
        assert_eq!(outcome.get_str("text").unwrap(), Some(display), "{version}");
        let coding = first_coding(outcome).unwrap().unwrap();
        assert_eq!(
            coding.get_str("code").unwrap(),
            Some(status.to_string().as_str()),
            "{version}"
        );
    }
}

#[test]
fn test_feedback_resolved_through_fixture_file() {
    let fixtures = json!({
        "insurees": [{"id": 12, "chf_id": "CHF123", "last_name": "Doe"}],
        "claims": [{"id": 100, "code": "CLM-1", "status": 4}],
        "feedbacks": [{
            "id": 9,
            "claim_id": 100,
            "insuree_id": 12,
            "comments": "Friendly staff",
            "feedback_date": "2024-02-01"
        }]
    });
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{fixtures}").unwrap();

    let config = FhirConfig::default();
    let repository = InMemoryRepository::from_json_file(file.path()).unwrap();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let feedback = Feedback {
        id: Some(9),
        claim_id: Some(100),
        insuree_id: Some(12),
        comments: Some("Friendly staff".to_string()),
        ..Default::default()
    };

    let request = CommunicationRequestConverter::to_fhir_obj(&ctx, &feedback).unwrap();
    let subject = request.get_object("subject").unwrap().unwrap();
    assert_eq!(subject.get_str("reference").unwrap(), Some("Patient/12"));

    let decoded =
        CommunicationRequestConverter::to_imis_obj(&ctx, &request, Some(&admin())).unwrap();
    assert_eq!(decoded.id, Some(9));
    assert_eq!(decoded.comments.as_deref(), Some("Friendly staff"));
}

#[test]
fn test_activity_definition_document_to_service() {
    let config = FhirConfig::default();
    let context = |code: &str, value: Value| {
        json!({
            "code": {"system": config.medical.usage_context_system, "code": code},
            "valueCodeableConcept": value
        })
    };
    let document = json!({
        "resourceType": "ActivityDefinition",
        "status": "active",
        "date": "2021-07-01",
        "name": "CONS",
        "title": "Consultation",
        "topic": [{"text": "C"}],
        "useContext": [
            context("gender", json!({"coding": [{"code": "F"}]})),
            context("age", json!({"coding": [{"code": "A"}, {"code": "K"}]})),
            context("workflow", json!({"text": "V"})),
            context("venue", json!({"text": "O"}))
        ],
        "extension": [{
            "url": config.medical.unit_price_url,
            "valueMoney": {"value": 42.5, "currency": "USD"}
        }]
    });
    let fixtures = json!({"services": [{"id": 4, "code": "CONS", "name": "Consultation"}]});
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{fixtures}").unwrap();
    let repository = InMemoryRepository::from_json_file(file.path()).unwrap();
    let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);

    let definition = FhirObject::from_dict(FhirVersion::R4, "Resource", &document).unwrap();
    let service = ActivityDefinitionConverter::to_imis_obj(&ctx, &definition, Some(&admin())).unwrap();
    assert_eq!(service.code.as_deref(), Some("CONS"));
    assert_eq!(service.patient_category, Some(14));
    assert_eq!(service.care_type.as_deref(), Some("O"));
    assert_eq!(service.validity_from, NaiveDate::from_ymd_opt(2021, 7, 1));

    let mut reference = FhirObject::create(FhirVersion::R4, "Reference").unwrap();
    reference.set("reference", "ActivityDefinition/CONS").unwrap();
    let resolved = ActivityDefinitionConverter::get_imis_obj_by_fhir_reference(&ctx, &reference)
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, Some(4));
}

#[test]
fn test_unknown_feedback_rendered_as_outcome() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
    let document = json!({"resourceType": "CommunicationRequest", "id": "404"});
    let request =
        FhirObject::from_dict(FhirVersion::Stu3, "CommunicationRequest", &document).unwrap();

    let err = CommunicationRequestConverter::to_imis_obj(&ctx, &request, Some(&admin()))
        .unwrap_err();
    assert!(err.to_string().ends_with("Could not find feedback 404"));

    let outcome = OperationOutcomeConverter::from_error(&ctx, &err).unwrap();
    let issue = outcome.objects("issue").unwrap()[0];
    assert_eq!(issue.get_str("code").unwrap(), Some("exception"));
}

#[test]
fn test_missing_record_rendered_as_not_found() {
    let config = FhirConfig::default();
    let repository = InMemoryRepository::new();
    let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);

    let outcome = OperationOutcomeConverter::from_error(
        &ctx,
        &FhirError::NotFound("Patient CHF999".to_string()),
    )
    .unwrap();
    let rendered = Value::Object(outcome.to_dict().unwrap());
    assert_eq!(rendered["issue"][0]["code"], "not-found");
    assert_eq!(
        rendered["issue"][0]["details"]["text"],
        "Not found: Patient CHF999"
    );
}
