//! Claim domain records
//!
//! A claim links an insuree, a facility and the claim administrator who
//! entered it, carries up to five diagnosis codes, and lists the medical
//! items and services being claimed.

use super::claim_admin::ClaimAdmin;
use super::health_facility::HealthFacility;
use super::insuree::Insuree;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claim status codes
pub const CLAIM_STATUS_REJECTED: i32 = 1;
pub const CLAIM_STATUS_ENTERED: i32 = 2;
pub const CLAIM_STATUS_CHECKED: i32 = 4;
pub const CLAIM_STATUS_PROCESSED: i32 = 8;
pub const CLAIM_STATUS_VALUATED: i32 = 16;

/// A submitted insurance claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Claim {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Claim business code
    pub code: Option<String>,

    pub date_claimed: Option<NaiveDate>,

    /// Start of the billable period
    pub date_from: Option<NaiveDate>,

    pub date_to: Option<NaiveDate>,

    pub health_facility: Option<HealthFacility>,

    pub insuree: Option<Insuree>,

    /// Claim administrator who entered the claim
    pub admin: Option<ClaimAdmin>,

    /// Main diagnosis
    pub icd: Option<DiagnosisCode>,

    pub icd_1: Option<DiagnosisCode>,

    pub icd_2: Option<DiagnosisCode>,

    pub icd_3: Option<DiagnosisCode>,

    pub icd_4: Option<DiagnosisCode>,

    /// Total amount claimed
    pub claimed: Option<f64>,

    pub approved: Option<f64>,

    pub reinsured: Option<f64>,

    pub valuated: Option<f64>,

    /// Status bit (1, 2, 4, 8, 16)
    pub status: Option<i32>,

    pub rejection_reason: Option<i32>,

    pub adjustment: Option<String>,

    pub date_processed: Option<NaiveDate>,

    pub guarantee_id: Option<String>,

    pub explanation: Option<String>,

    /// Visit type (emergency, referral, other)
    pub visit_type: Option<String>,

    pub items: Vec<ClaimItem>,

    pub services: Vec<ClaimService>,

    pub feedback: Option<Feedback>,

    pub audit_user_id: Option<i64>,
}

impl Claim {
    /// Diagnosis slots in order, paired with their slot tag
    pub fn diagnosis_slots(&self) -> [(DiagnosisSlot, Option<&DiagnosisCode>); 5] {
        [
            (DiagnosisSlot::Icd0, self.icd.as_ref()),
            (DiagnosisSlot::Icd1, self.icd_1.as_ref()),
            (DiagnosisSlot::Icd2, self.icd_2.as_ref()),
            (DiagnosisSlot::Icd3, self.icd_3.as_ref()),
            (DiagnosisSlot::Icd4, self.icd_4.as_ref()),
        ]
    }

    /// Stores a diagnosis in the given slot
    pub fn set_diagnosis(&mut self, slot: DiagnosisSlot, code: DiagnosisCode) {
        match slot {
            DiagnosisSlot::Icd0 => self.icd = Some(code),
            DiagnosisSlot::Icd1 => self.icd_1 = Some(code),
            DiagnosisSlot::Icd2 => self.icd_2 = Some(code),
            DiagnosisSlot::Icd3 => self.icd_3 = Some(code),
            DiagnosisSlot::Icd4 => self.icd_4 = Some(code),
        }
    }
}

/// One of the five diagnosis columns of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosisSlot {
    Icd0,
    Icd1,
    Icd2,
    Icd3,
    Icd4,
}

impl DiagnosisSlot {
    /// Tag written as the diagnosis `type` text
    pub fn as_tag(&self) -> &'static str {
        match self {
            DiagnosisSlot::Icd0 => "icd_0",
            DiagnosisSlot::Icd1 => "icd_1",
            DiagnosisSlot::Icd2 => "icd_2",
            DiagnosisSlot::Icd3 => "icd_3",
            DiagnosisSlot::Icd4 => "icd_4",
        }
    }

    /// Reverse of [`DiagnosisSlot::as_tag`]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "icd_0" => Some(DiagnosisSlot::Icd0),
            "icd_1" => Some(DiagnosisSlot::Icd1),
            "icd_2" => Some(DiagnosisSlot::Icd2),
            "icd_3" => Some(DiagnosisSlot::Icd3),
            "icd_4" => Some(DiagnosisSlot::Icd4),
            _ => None,
        }
    }
}

/// ICD diagnosis code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisCode {
    pub id: Option<i64>,

    pub code: String,

    pub name: Option<String>,
}

impl DiagnosisCode {
    /// Creates a code with no name
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
            name: None,
        }
    }
}

/// A medical item (drug, consumable) on a claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimItem {
    /// Medical item code
    pub code: String,

    pub qty_provided: Option<f64>,

    pub price_asked: Option<f64>,
}

/// A medical service (procedure, consultation) on a claim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimService {
    /// Medical service code
    pub code: String,

    pub qty_provided: Option<f64>,

    pub price_asked: Option<f64>,
}

/// Feedback request attached to a claim, exposed as `CommunicationRequest`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub id: Option<i64>,

    pub uuid: Option<Uuid>,

    /// Claim the feedback is about
    pub claim_id: Option<i64>,

    /// Insuree the feedback is requested from
    pub insuree_id: Option<i64>,

    pub comments: Option<String>,

    pub feedback_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_tag_round_trip() {
        for slot in [
            DiagnosisSlot::Icd0,
            DiagnosisSlot::Icd1,
            DiagnosisSlot::Icd2,
            DiagnosisSlot::Icd3,
            DiagnosisSlot::Icd4,
        ] {
            assert_eq!(DiagnosisSlot::from_tag(slot.as_tag()), Some(slot));
        }
        assert_eq!(DiagnosisSlot::from_tag("icd_5"), None);
    }

    #[test]
    fn test_set_diagnosis_targets_slot() {
        let mut claim = Claim::default();
        claim.set_diagnosis(DiagnosisSlot::Icd3, DiagnosisCode::new("A01"));
        assert_eq!(claim.icd_3.as_ref().map(|d| d.code.as_str()), Some("A01"));
        assert!(claim.icd.is_none());
        let filled: Vec<_> = claim
            .diagnosis_slots()
            .into_iter()
            .filter(|(_, code)| code.is_some())
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(filled, vec![DiagnosisSlot::Icd3]);
    }
}
