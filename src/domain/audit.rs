//! Audit identity passed to inbound conversions

use serde::{Deserialize, Serialize};

/// Authenticated caller on whose behalf a domain record is written
///
/// Authentication happens upstream; converters only read the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditUser {
    /// Login name
    pub username: String,

    /// Numeric audit id used by the persistence layer, when the account has one
    pub legacy_id: Option<i64>,
}

impl AuditUser {
    /// Creates an identity with a numeric audit id
    pub fn new(username: impl Into<String>, legacy_id: i64) -> Self {
        Self {
            username: username.into(),
            legacy_id: Some(legacy_id),
        }
    }

    /// Audit id to store, falling back to `default_id`
    pub fn audit_id(&self, default_id: i64) -> i64 {
        self.legacy_id.unwrap_or(default_id)
    }
}
