//! Conversion commands
//!
//! `to-fhir` reads a domain record as JSON and prints the FHIR resource.
//! `to-imis` reads a FHIR resource and prints the domain record; references
//! are resolved against an optional fixtures file. A failed conversion
//! prints an OperationOutcome document and exits with code 1.

use super::load_config_or_default;
use crate::adapters::InMemoryRepository;
use crate::config::FhirConfig;
use crate::converters::{
    ActivityDefinitionConverter, ClaimConverter, ClaimResponseConverter,
    CommunicationRequestConverter, ConversionContext, FhirConverter, LocationConverter,
    MedicationConverter, OperationOutcomeConverter, PatientConverter, PractitionerConverter,
    PractitionerRoleConverter,
};
use crate::domain::{AuditUser, FhirError, Result};
use crate::model::{FhirObject, FhirVersion};
use crate::{log_conversion_failure, log_conversion_start};
use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;

/// Resources the CLI converts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Patient,
    Location,
    Practitioner,
    PractitionerRole,
    Claim,
    ClaimResponse,
    CommunicationRequest,
    /// Medical service, R4 only
    ActivityDefinition,
    /// Medical item, R4 only
    Medication,
}

impl ResourceKind {
    /// FHIR resource type name
    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceKind::Patient => PatientConverter::RESOURCE_TYPE,
            ResourceKind::Location => LocationConverter::RESOURCE_TYPE,
            ResourceKind::Practitioner => PractitionerConverter::RESOURCE_TYPE,
            ResourceKind::PractitionerRole => PractitionerRoleConverter::RESOURCE_TYPE,
            ResourceKind::Claim => ClaimConverter::RESOURCE_TYPE,
            ResourceKind::ClaimResponse => ClaimResponseConverter::RESOURCE_TYPE,
            ResourceKind::CommunicationRequest => CommunicationRequestConverter::RESOURCE_TYPE,
            ResourceKind::ActivityDefinition => ActivityDefinitionConverter::RESOURCE_TYPE,
            ResourceKind::Medication => MedicationConverter::RESOURCE_TYPE,
        }
    }
}

/// Arguments for the to-fhir command
#[derive(Args, Debug)]
pub struct ToFhirArgs {
    /// Resource to produce
    #[arg(short, long, value_enum)]
    pub resource: ResourceKind,

    /// Domain record as JSON
    #[arg(short, long)]
    pub input: String,

    /// FHIR release (stu3, r4); defaults to application.default_version
    #[arg(long)]
    pub fhir_version: Option<String>,

    /// Fixtures used to resolve related records
    #[arg(long)]
    pub fixtures: Option<String>,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ToFhirArgs {
    /// Execute the to-fhir command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(session) = Session::open(config_path, self.fhir_version.as_deref(), self.fixtures.as_deref())?
        else {
            return Ok(2);
        };
        log_conversion_start!(self.resource.resource_type(), "to-fhir", session.version);

        let input = fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input {}", self.input))?;
        let ctx = session.context();
        let result = match self.resource {
            ResourceKind::Patient => record_to_fhir::<PatientConverter>(&ctx, &input),
            ResourceKind::Location => record_to_fhir::<LocationConverter>(&ctx, &input),
            ResourceKind::Practitioner => record_to_fhir::<PractitionerConverter>(&ctx, &input),
            ResourceKind::PractitionerRole => {
                record_to_fhir::<PractitionerRoleConverter>(&ctx, &input)
            }
            ResourceKind::Claim => record_to_fhir::<ClaimConverter>(&ctx, &input),
            ResourceKind::ClaimResponse => record_to_fhir::<ClaimResponseConverter>(&ctx, &input),
            ResourceKind::CommunicationRequest => {
                record_to_fhir::<CommunicationRequestConverter>(&ctx, &input)
            }
            ResourceKind::ActivityDefinition => {
                record_to_fhir::<ActivityDefinitionConverter>(&ctx, &input)
            }
            ResourceKind::Medication => record_to_fhir::<MedicationConverter>(&ctx, &input),
        };
        finish(&ctx, self.resource, result, self.output.as_deref())
    }
}

/// Arguments for the to-imis command
#[derive(Args, Debug)]
pub struct ToImisArgs {
    /// Resource contained in the input
    #[arg(short, long, value_enum)]
    pub resource: ResourceKind,

    /// FHIR resource as JSON
    #[arg(short, long)]
    pub input: String,

    /// FHIR release (stu3, r4); defaults to application.default_version
    #[arg(long)]
    pub fhir_version: Option<String>,

    /// Fixtures used to resolve references
    #[arg(long)]
    pub fixtures: Option<String>,

    /// Username of the audit identity
    #[arg(long)]
    pub user: Option<String>,

    /// Numeric audit id of the audit identity
    #[arg(long, requires = "user")]
    pub user_id: Option<i64>,

    /// Write the record here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

impl ToImisArgs {
    /// Execute the to-imis command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(session) = Session::open(config_path, self.fhir_version.as_deref(), self.fixtures.as_deref())?
        else {
            return Ok(2);
        };
        log_conversion_start!(self.resource.resource_type(), "to-imis", session.version);

        let input = fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read input {}", self.input))?;
        let audit_user = self.user.as_ref().map(|username| AuditUser {
            username: username.clone(),
            legacy_id: self.user_id,
        });
        let user = audit_user.as_ref();
        let ctx = session.context();
        let result = match self.resource {
            ResourceKind::Patient => resource_to_imis::<PatientConverter>(&ctx, &input, user),
            ResourceKind::Location => resource_to_imis::<LocationConverter>(&ctx, &input, user),
            ResourceKind::Practitioner => {
                resource_to_imis::<PractitionerConverter>(&ctx, &input, user)
            }
            ResourceKind::PractitionerRole => {
                resource_to_imis::<PractitionerRoleConverter>(&ctx, &input, user)
            }
            ResourceKind::Claim => resource_to_imis::<ClaimConverter>(&ctx, &input, user),
            ResourceKind::ClaimResponse => {
                resource_to_imis::<ClaimResponseConverter>(&ctx, &input, user)
            }
            ResourceKind::CommunicationRequest => {
                resource_to_imis::<CommunicationRequestConverter>(&ctx, &input, user)
            }
            ResourceKind::ActivityDefinition => {
                resource_to_imis::<ActivityDefinitionConverter>(&ctx, &input, user)
            }
            ResourceKind::Medication => {
                resource_to_imis::<MedicationConverter>(&ctx, &input, user)
            }
        };
        finish(&ctx, self.resource, result, self.output.as_deref())
    }
}

/// Configuration, version and repository shared by both directions
struct Session {
    config: FhirConfig,
    version: FhirVersion,
    repository: InMemoryRepository,
}

impl Session {
    /// `None` when the configuration or version is unusable
    fn open(
        config_path: &str,
        version: Option<&str>,
        fixtures: Option<&str>,
    ) -> anyhow::Result<Option<Self>> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(None);
            }
        };
        let version = match version {
            Some(raw) => raw.parse::<FhirVersion>().map_err(|e| e.to_string()),
            None => config.application.fhir_version(),
        };
        let version = match version {
            Ok(version) => version,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(None);
            }
        };
        let repository = match fixtures {
            Some(path) => InMemoryRepository::from_json_file(path)?,
            None => InMemoryRepository::new(),
        };
        Ok(Some(Self {
            config,
            version,
            repository,
        }))
    }

    fn context(&self) -> ConversionContext<'_> {
        ConversionContext::new(self.version, &self.config, &self.repository)
    }
}

fn record_to_fhir<C>(ctx: &ConversionContext<'_>, input: &str) -> Result<String>
where
    C: FhirConverter,
    C::Record: DeserializeOwned,
{
    let record: C::Record = serde_json::from_str(input)?;
    C::to_fhir_obj(ctx, &record)?.dumps("json")
}

fn resource_to_imis<C>(
    ctx: &ConversionContext<'_>,
    input: &str,
    audit_user: Option<&AuditUser>,
) -> Result<String>
where
    C: FhirConverter,
    C::Record: Serialize,
{
    let resource = FhirObject::from_json(ctx.version, C::RESOURCE_TYPE, input)?;
    let record = C::to_imis_obj(ctx, &resource, audit_user)?;
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Writes the converted document, or reports the failure as an OperationOutcome
fn finish(
    ctx: &ConversionContext<'_>,
    resource: ResourceKind,
    result: Result<String>,
    output: Option<&str>,
) -> anyhow::Result<i32> {
    match result {
        Ok(document) => {
            write_output(&document, output)?;
            tracing::info!(resource = resource.resource_type(), "Conversion completed");
            Ok(0)
        }
        Err(error) => {
            log_conversion_failure!(resource.resource_type(), &error);
            println!("{}", render_outcome(ctx, &error)?);
            Ok(1)
        }
    }
}

fn render_outcome(ctx: &ConversionContext<'_>, error: &FhirError) -> Result<String> {
    OperationOutcomeConverter::from_error(ctx, error)?.dumps("json")
}

fn write_output(document: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{document}\n"))
                .with_context(|| format!("Failed to write output {path}"))?;
        }
        None => println!("{document}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Insuree;
    use serde_json::Value;

    #[test]
    fn test_record_to_fhir_patient() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let input = r#"{"last_name": "Doe", "other_names": "Jane", "chf_id": "CHF123"}"#;

        let document = record_to_fhir::<PatientConverter>(&ctx, input).unwrap();
        let value: Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["resourceType"], "Patient");
        assert_eq!(value["name"][0]["family"], "Doe");
    }

    #[test]
    fn test_resource_to_imis_requires_audit_user() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let insuree = Insuree {
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        let input = PatientConverter::to_fhir_obj(&ctx, &insuree)
            .unwrap()
            .to_json()
            .unwrap();

        let err = resource_to_imis::<PatientConverter>(&ctx, &input, None).unwrap_err();
        assert!(matches!(err, FhirError::NotAuthenticated));
    }

    #[test]
    fn test_wrong_resource_type_rendered_as_outcome() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::Stu3, &config, &repository);
        let input = r#"{"resourceType": "Location", "name": "Central"}"#;

        let err = resource_to_imis::<ClaimConverter>(&ctx, input, None).unwrap_err();
        let outcome: Value = serde_json::from_str(&render_outcome(&ctx, &err).unwrap()).unwrap();
        assert_eq!(outcome["resourceType"], "OperationOutcome");
        assert_eq!(outcome["issue"][0]["severity"], "error");
        assert_eq!(outcome["issue"][0]["code"], "exception");
    }

    #[test]
    fn test_record_to_fhir_activity_definition() {
        let config = FhirConfig::default();
        let repository = InMemoryRepository::new();
        let ctx = ConversionContext::new(FhirVersion::R4, &config, &repository);
        let input = r#"{"code": "CONS", "name": "Consultation", "type": "C", "price": 42.5}"#;

        let document = record_to_fhir::<ActivityDefinitionConverter>(&ctx, input).unwrap();
        let value: Value = serde_json::from_str(&document).unwrap();
        assert_eq!(value["resourceType"], "ActivityDefinition");
        assert_eq!(value["topic"][0]["text"], "C");
        assert_eq!(value["extension"][0]["valueMoney"]["value"], 42.5);
    }

    #[test]
    fn test_resource_type_names() {
        assert_eq!(ResourceKind::PractitionerRole.resource_type(), "PractitionerRole");
        assert_eq!(
            ResourceKind::CommunicationRequest.resource_type(),
            "CommunicationRequest"
        );
        assert_eq!(ResourceKind::Medication.resource_type(), "Medication");
    }
}
