//! Configuration schema types
//!
//! Every key has a serde default, so an empty TOML document is a complete
//! configuration.

use crate::model::FhirVersion;
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// Constructed once and passed by reference to every conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FhirConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Defaults and formats shared by every converter
    #[serde(default)]
    pub general: GeneralConfig,

    /// Identifier type system and codes
    #[serde(default)]
    pub identifier: IdentifierConfig,

    /// Location role and physical type codes
    #[serde(default)]
    pub location: LocationConfig,

    /// Marital status codes
    #[serde(default)]
    pub marital: MaritalConfig,

    /// OperationOutcome issue type codes
    #[serde(default)]
    pub issue_type: IssueTypeConfig,

    /// Claim information categories and status displays
    #[serde(default)]
    pub claim: ClaimConfig,

    /// Price catalog (services and medical items)
    #[serde(default)]
    pub medical: MedicalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FhirConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.general.validate()?;
        self.identifier.validate()?;
        self.location.validate()?;
        self.marital.validate()?;
        self.issue_type.validate()?;
        self.claim.validate()?;
        self.medical.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Renders the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to render TOML: {e}"))
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    Ok(())
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// FHIR release used when a command does not name one (stu3, r4)
    #[serde(default = "default_version")]
    pub default_version: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        self.fhir_version()?;
        Ok(())
    }

    /// Parsed `default_version`
    pub fn fhir_version(&self) -> Result<FhirVersion, String> {
        self.default_version.parse().map_err(|_| {
            format!(
                "Invalid application.default_version '{}'. Must be one of: stu3, r4",
                self.default_version
            )
        })
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_version: default_version(),
        }
    }
}

/// Single-letter gender codes stored on domain records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderCodes {
    #[serde(default = "default_gender_male")]
    pub male: String,

    #[serde(default = "default_gender_female")]
    pub female: String,

    #[serde(default = "default_gender_other")]
    pub other: String,
}

impl Default for GenderCodes {
    fn default() -> Self {
        Self {
            male: default_gender_male(),
            female: default_gender_female(),
            other: default_gender_other(),
        }
    }
}

/// Defaults and formats shared by every converter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Audit id stored when the caller has no legacy id
    #[serde(default = "default_audit_user_id")]
    pub default_audit_user_id: i64,

    /// chrono format of FHIR `date` values
    #[serde(default = "default_iso_date_format")]
    pub iso_date_format: String,

    /// chrono format of FHIR `dateTime` values
    #[serde(default = "default_iso_datetime_format")]
    pub iso_datetime_format: String,

    #[serde(default)]
    pub gender_codes: GenderCodes,

    #[serde(default)]
    pub default_patient_head: bool,

    #[serde(default)]
    pub default_patient_card_issued: bool,

    #[serde(default)]
    pub default_location_offline: bool,

    /// Care type stored on facilities decoded from a Location
    #[serde(default = "default_care_type")]
    pub default_location_care_type: String,

    /// ISO 4217 currency of every Money value
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_audit_user_id <= 0 {
            return Err("general.default_audit_user_id must be > 0".to_string());
        }
        require_non_empty("general.iso_date_format", &self.iso_date_format)?;
        require_non_empty("general.iso_datetime_format", &self.iso_datetime_format)?;
        require_non_empty("general.currency", &self.currency)?;
        let codes = &self.gender_codes;
        if codes.male == codes.female || codes.male == codes.other || codes.female == codes.other
        {
            return Err("general.gender_codes must be distinct".to_string());
        }
        Ok(())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_audit_user_id: default_audit_user_id(),
            iso_date_format: default_iso_date_format(),
            iso_datetime_format: default_iso_datetime_format(),
            gender_codes: GenderCodes::default(),
            default_patient_head: false,
            default_patient_card_issued: false,
            default_location_offline: false,
            default_location_care_type: default_care_type(),
            currency: default_currency(),
        }
    }
}

/// Identifier type system and the code of each identifier kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierConfig {
    #[serde(default = "default_identifier_system")]
    pub system: String,

    /// Internal database id
    #[serde(default = "default_id_type_code")]
    pub id_type_code: String,

    /// Insurance (social benefit) number
    #[serde(default = "default_chfid_type_code")]
    pub chfid_type_code: String,

    #[serde(default = "default_passport_type_code")]
    pub passport_type_code: String,

    /// Health facility code
    #[serde(default = "default_facility_id_type")]
    pub facility_id_type: String,

    /// Administrative location code
    #[serde(default = "default_location_code_type")]
    pub location_code_type: String,

    #[serde(default = "default_claim_code_type")]
    pub claim_code_type: String,

    #[serde(default = "default_claim_admin_code_type")]
    pub claim_admin_code_type: String,

    #[serde(default = "default_uuid_type_code")]
    pub uuid_type_code: String,

    /// Medical service code
    #[serde(default = "default_service_code_type")]
    pub service_code_type: String,

    /// Medical item code
    #[serde(default = "default_item_code_type")]
    pub item_code_type: String,
}

impl IdentifierConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("identifier.system", &self.system)?;
        let codes = [
            ("identifier.id_type_code", &self.id_type_code),
            ("identifier.chfid_type_code", &self.chfid_type_code),
            ("identifier.passport_type_code", &self.passport_type_code),
            ("identifier.facility_id_type", &self.facility_id_type),
            ("identifier.location_code_type", &self.location_code_type),
            ("identifier.claim_code_type", &self.claim_code_type),
            ("identifier.claim_admin_code_type", &self.claim_admin_code_type),
            ("identifier.uuid_type_code", &self.uuid_type_code),
            ("identifier.service_code_type", &self.service_code_type),
            ("identifier.item_code_type", &self.item_code_type),
        ];
        for (field, value) in codes {
            require_non_empty(field, value)?;
        }
        Ok(())
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            system: default_identifier_system(),
            id_type_code: default_id_type_code(),
            chfid_type_code: default_chfid_type_code(),
            passport_type_code: default_passport_type_code(),
            facility_id_type: default_facility_id_type(),
            location_code_type: default_location_code_type(),
            claim_code_type: default_claim_code_type(),
            claim_admin_code_type: default_claim_admin_code_type(),
            uuid_type_code: default_uuid_type_code(),
            service_code_type: default_service_code_type(),
            item_code_type: default_item_code_type(),
        }
    }
}

/// Location role type and physical type codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_role_type_system")]
    pub role_type_system: String,

    #[serde(default = "default_code_for_hospital")]
    pub code_for_hospital: String,

    #[serde(default = "default_code_for_dispensary")]
    pub code_for_dispensary: String,

    #[serde(default = "default_code_for_health_center")]
    pub code_for_health_center: String,

    #[serde(default = "default_physical_type_system")]
    pub physical_type_system: String,

    #[serde(default = "default_code_for_region")]
    pub code_for_region: String,

    #[serde(default = "default_code_for_district")]
    pub code_for_district: String,

    #[serde(default = "default_code_for_ward")]
    pub code_for_ward: String,

    #[serde(default = "default_code_for_village")]
    pub code_for_village: String,
}

impl LocationConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("location.role_type_system", &self.role_type_system)?;
        require_non_empty("location.physical_type_system", &self.physical_type_system)?;
        let levels = [
            &self.code_for_hospital,
            &self.code_for_dispensary,
            &self.code_for_health_center,
        ];
        if levels.iter().any(|code| code.trim().is_empty()) {
            return Err("location facility level codes cannot be empty".to_string());
        }
        if levels[0] == levels[1] || levels[0] == levels[2] || levels[1] == levels[2] {
            return Err("location facility level codes must be distinct".to_string());
        }
        Ok(())
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            role_type_system: default_role_type_system(),
            code_for_hospital: default_code_for_hospital(),
            code_for_dispensary: default_code_for_dispensary(),
            code_for_health_center: default_code_for_health_center(),
            physical_type_system: default_physical_type_system(),
            code_for_region: default_code_for_region(),
            code_for_district: default_code_for_district(),
            code_for_ward: default_code_for_ward(),
            code_for_village: default_code_for_village(),
        }
    }
}

/// Marital status system and codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaritalConfig {
    #[serde(default = "default_marital_system")]
    pub system: String,

    #[serde(default = "default_married")]
    pub married: String,

    #[serde(default = "default_never_married")]
    pub never_married: String,

    #[serde(default = "default_divorced")]
    pub divorced: String,

    #[serde(default = "default_widowed")]
    pub widowed: String,

    #[serde(default = "default_unknown")]
    pub unknown: String,
}

impl MaritalConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("marital.system", &self.system)
    }
}

impl Default for MaritalConfig {
    fn default() -> Self {
        Self {
            system: default_marital_system(),
            married: default_married(),
            never_married: default_never_married(),
            divorced: default_divorced(),
            widowed: default_widowed(),
            unknown: default_unknown(),
        }
    }
}

/// OperationOutcome issue type codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeConfig {
    #[serde(default = "default_code_for_exception")]
    pub code_for_exception: String,

    #[serde(default = "default_code_for_not_found")]
    pub code_for_not_found: String,

    #[serde(default = "default_code_for_informational")]
    pub code_for_informational: String,
}

impl IssueTypeConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("issue_type.code_for_exception", &self.code_for_exception)?;
        require_non_empty("issue_type.code_for_not_found", &self.code_for_not_found)
    }
}

impl Default for IssueTypeConfig {
    fn default() -> Self {
        Self {
            code_for_exception: default_code_for_exception(),
            code_for_not_found: default_code_for_not_found(),
            code_for_informational: default_code_for_informational(),
        }
    }
}

/// Claim information categories, item categories and status displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimConfig {
    #[serde(default = "default_guarantee_id_code")]
    pub guarantee_id_code: String,

    #[serde(default = "default_explanation_code")]
    pub explanation_code: String,

    #[serde(default = "default_item_code")]
    pub item_code: String,

    #[serde(default = "default_service_code")]
    pub service_code: String,

    #[serde(default = "default_status_rejected")]
    pub status_rejected: String,

    #[serde(default = "default_status_entered")]
    pub status_entered: String,

    #[serde(default = "default_status_checked")]
    pub status_checked: String,

    #[serde(default = "default_status_processed")]
    pub status_processed: String,

    #[serde(default = "default_status_valuated")]
    pub status_valuated: String,

    /// Code system of ClaimResponse total categories
    #[serde(default = "default_adjudication_system")]
    pub adjudication_system: String,
}

impl ClaimConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("claim.adjudication_system", &self.adjudication_system)?;
        if self.item_code == self.service_code {
            return Err("claim.item_code and claim.service_code must differ".to_string());
        }
        let displays = self.status_displays();
        for (i, (_, display)) in displays.iter().enumerate() {
            if display.trim().is_empty() {
                return Err("claim status displays cannot be empty".to_string());
            }
            if displays[..i].iter().any(|(_, other)| other == display) {
                return Err(format!("claim status display '{display}' is used twice"));
            }
        }
        Ok(())
    }

    /// Status code and display pairs, in status order
    pub fn status_displays(&self) -> [(i32, &str); 5] {
        [
            (1, self.status_rejected.as_str()),
            (2, self.status_entered.as_str()),
            (4, self.status_checked.as_str()),
            (8, self.status_processed.as_str()),
            (16, self.status_valuated.as_str()),
        ]
    }

    /// Display string of a claim status, `None` for unknown codes
    pub fn status_display(&self, status: i32) -> Option<&str> {
        self.status_displays()
            .into_iter()
            .find(|(code, _)| *code == status)
            .map(|(_, display)| display)
    }
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            guarantee_id_code: default_guarantee_id_code(),
            explanation_code: default_explanation_code(),
            item_code: default_item_code(),
            service_code: default_service_code(),
            status_rejected: default_status_rejected(),
            status_entered: default_status_entered(),
            status_checked: default_status_checked(),
            status_processed: default_status_processed(),
            status_valuated: default_status_valuated(),
            adjudication_system: default_adjudication_system(),
        }
    }
}

/// Usage context codes and the unit price extension of catalog resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalConfig {
    /// Code system of `ActivityDefinition.useContext` codes
    #[serde(default = "default_usage_context_system")]
    pub usage_context_system: String,

    #[serde(default = "default_unit_price_url")]
    pub unit_price_url: String,

    /// Status written on every catalog resource
    #[serde(default = "default_catalog_status")]
    pub catalog_status: String,
}

impl MedicalConfig {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("medical.usage_context_system", &self.usage_context_system)?;
        require_non_empty("medical.unit_price_url", &self.unit_price_url)?;
        require_non_empty("medical.catalog_status", &self.catalog_status)
    }
}

impl Default for MedicalConfig {
    fn default() -> Self {
        Self {
            usage_context_system: default_usage_context_system(),
            unit_price_url: default_unit_price_url(),
            catalog_status: default_catalog_status(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled {
            require_non_empty("logging.local_path", &self.local_path)?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_version() -> String {
    "stu3".to_string()
}

fn default_audit_user_id() -> i64 {
    1
}

fn default_iso_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_iso_datetime_format() -> String {
    "%Y-%m-%dT%H:%M:%S".to_string()
}

fn default_gender_male() -> String {
    "M".to_string()
}

fn default_gender_female() -> String {
    "F".to_string()
}

fn default_gender_other() -> String {
    "O".to_string()
}

fn default_care_type() -> String {
    "B".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_identifier_system() -> String {
    "https://hl7.org/fhir/valueset-identifier-type.html".to_string()
}

fn default_id_type_code() -> String {
    "ACSN".to_string()
}

fn default_chfid_type_code() -> String {
    "SB".to_string()
}

fn default_passport_type_code() -> String {
    "PPN".to_string()
}

fn default_facility_id_type() -> String {
    "FI".to_string()
}

fn default_location_code_type() -> String {
    "LC".to_string()
}

fn default_claim_code_type() -> String {
    "MR".to_string()
}

fn default_claim_admin_code_type() -> String {
    "FILL".to_string()
}

fn default_uuid_type_code() -> String {
    "UUID".to_string()
}

fn default_role_type_system() -> String {
    "http://hl7.org/fhir/v3/ServiceDeliveryLocationRoleType/vs.html".to_string()
}

fn default_code_for_hospital() -> String {
    "HOSP".to_string()
}

fn default_code_for_dispensary() -> String {
    "CSC".to_string()
}

fn default_code_for_health_center() -> String {
    "PC".to_string()
}

fn default_physical_type_system() -> String {
    "http://terminology.hl7.org/CodeSystem/location-physical-type".to_string()
}

fn default_code_for_region() -> String {
    "R".to_string()
}

fn default_code_for_district() -> String {
    "D".to_string()
}

fn default_code_for_ward() -> String {
    "W".to_string()
}

fn default_code_for_village() -> String {
    "V".to_string()
}

fn default_marital_system() -> String {
    "http://hl7.org/fhir/v3/MaritalStatus".to_string()
}

fn default_married() -> String {
    "M".to_string()
}

fn default_never_married() -> String {
    "S".to_string()
}

fn default_divorced() -> String {
    "D".to_string()
}

fn default_widowed() -> String {
    "W".to_string()
}

fn default_unknown() -> String {
    "U".to_string()
}

fn default_code_for_exception() -> String {
    "exception".to_string()
}

fn default_code_for_not_found() -> String {
    "not-found".to_string()
}

fn default_code_for_informational() -> String {
    "informational".to_string()
}

fn default_guarantee_id_code() -> String {
    "guarantee_id".to_string()
}

fn default_explanation_code() -> String {
    "explanation".to_string()
}

fn default_item_code() -> String {
    "item".to_string()
}

fn default_service_code() -> String {
    "service".to_string()
}

fn default_status_rejected() -> String {
    "rejected".to_string()
}

fn default_status_entered() -> String {
    "entered".to_string()
}

fn default_status_checked() -> String {
    "checked".to_string()
}

fn default_status_processed() -> String {
    "processed".to_string()
}

fn default_status_valuated() -> String {
    "valuated".to_string()
}

fn default_adjudication_system() -> String {
    "http://terminology.hl7.org/CodeSystem/adjudication.html".to_string()
}

fn default_service_code_type() -> String {
    "SCODE".to_string()
}

fn default_item_code_type() -> String {
    "ICODE".to_string()
}

fn default_usage_context_system() -> String {
    "http://terminology.hl7.org/CodeSystem/usage-context-type".to_string()
}

fn default_unit_price_url() -> String {
    "https://openimis.org/fhir/StructureDefinition/unit-price".to_string()
}

fn default_catalog_status() -> String {
    "active".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: FhirConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.identifier.chfid_type_code, "SB");
        assert_eq!(config.location.code_for_hospital, "HOSP");
        assert_eq!(config.general.default_audit_user_id, 1);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fhir_version().unwrap(), FhirVersion::Stu3);

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_level = "debug".to_string();
        config.default_version = "dstu2".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_general_config_validation() {
        let mut config = GeneralConfig::default();
        config.default_audit_user_id = 0;
        assert!(config.validate().is_err());

        let mut config = GeneralConfig::default();
        config.gender_codes.female = "M".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_identifier_codes_required() {
        let mut config = IdentifierConfig::default();
        config.passport_type_code = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("passport_type_code"));
    }

    #[test]
    fn test_medical_defaults_and_validation() {
        let config: FhirConfig = toml::from_str("[medical]\ncatalog_status = \"draft\"\n").unwrap();
        assert_eq!(config.medical.catalog_status, "draft");
        assert_eq!(config.identifier.service_code_type, "SCODE");
        assert!(config.medical.unit_price_url.ends_with("unit-price"));

        let mut medical = MedicalConfig::default();
        medical.unit_price_url = String::new();
        assert!(medical.validate().unwrap_err().contains("unit_price_url"));
    }

    #[test]
    fn test_status_displays() {
        let config = ClaimConfig::default();
        assert_eq!(config.status_display(8), Some("processed"));
        assert_eq!(config.status_display(3), None);

        let mut duplicated = ClaimConfig::default();
        duplicated.status_checked = "entered".to_string();
        assert!(duplicated.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());
        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: FhirConfig = toml::from_str(
            r#"
[general]
currency = "TZS"

[claim]
status_valuated = "paid"
"#,
        )
        .unwrap();
        assert_eq!(config.general.currency, "TZS");
        assert_eq!(config.general.iso_date_format, "%Y-%m-%d");
        assert_eq!(config.claim.status_display(16), Some("paid"));
        assert_eq!(config.claim.status_display(1), Some("rejected"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let rendered = FhirConfig::default().to_toml_string().unwrap();
        let parsed: FhirConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.marital.system, "http://hl7.org/fhir/v3/MaritalStatus");
    }
}
