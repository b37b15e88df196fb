//! Medical service and item catalog records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient category bit for male patients
pub const PATIENT_CATEGORY_MALE: i32 = 1;
/// Patient category bit for female patients
pub const PATIENT_CATEGORY_FEMALE: i32 = 2;
/// Patient category bit for adults
pub const PATIENT_CATEGORY_ADULT: i32 = 4;
/// Patient category bit for children
pub const PATIENT_CATEGORY_CHILD: i32 = 8;

/// Gender bits of a patient category and their letters
pub const PATIENT_GENDER_FLAGS: [(i32, &str); 2] = [
    (PATIENT_CATEGORY_MALE, "M"),
    (PATIENT_CATEGORY_FEMALE, "F"),
];

/// Age bits of a patient category and their letters
pub const PATIENT_AGE_FLAGS: [(i32, &str); 2] = [
    (PATIENT_CATEGORY_ADULT, "A"),
    (PATIENT_CATEGORY_CHILD, "K"),
];

/// Letters of the bits set in `category`, in flag order
pub fn patient_category_letters(category: i32, flags: &[(i32, &'static str)]) -> Vec<&'static str> {
    flags
        .iter()
        .filter(|(bit, _)| category & bit != 0)
        .map(|(_, letter)| *letter)
        .collect()
}

/// Bit of a patient category letter, `None` for unknown letters
pub fn patient_category_bit(letter: &str) -> Option<i32> {
    PATIENT_GENDER_FLAGS
        .iter()
        .chain(PATIENT_AGE_FLAGS.iter())
        .find(|(_, known)| *known == letter)
        .map(|(bit, _)| *bit)
}

/// A medical service from the price catalog, exposed as `ActivityDefinition`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Service business code
    pub code: Option<String>,

    pub name: Option<String>,

    /// Preventive or curative service type
    #[serde(rename = "type")]
    pub service_type: Option<String>,

    pub price: Option<f64>,

    /// In-patient, out-patient or both
    pub care_type: Option<String>,

    pub category: Option<String>,

    /// Sum of the `PATIENT_CATEGORY_*` bits the service applies to
    pub patient_category: Option<i32>,

    pub validity_from: Option<NaiveDate>,

    pub audit_user_id: Option<i64>,
}

/// A drug or consumable from the price catalog, exposed as `Medication`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalItem {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Item business code
    pub code: Option<String>,

    pub name: Option<String>,

    /// Package description, `"<amount> <form>"` such as `"10 tablets"`
    pub package: Option<String>,

    pub price: Option<f64>,

    pub care_type: Option<String>,

    pub patient_category: Option<i32>,

    pub validity_from: Option<NaiveDate>,

    pub audit_user_id: Option<i64>,
}
