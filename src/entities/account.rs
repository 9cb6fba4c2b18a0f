// 🎓 Account Record - one row of the account directory
//
// (identifier, display_name) is the lookup key, account_id is the value
// handed back on a match. The resolver never interprets account_id.

use crate::normalize::{normalize_identifier, normalize_name};
use serde::{Deserialize, Serialize};

// ============================================================================
// ACCOUNT RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Student number, e.g. "30101"
    #[serde(rename = "student_no")]
    pub identifier: String,

    /// Name as originally entered, may contain spaces ("홍 길동")
    #[serde(rename = "name")]
    pub display_name: String,

    /// Account handed back on a match
    pub account_id: String,
}

impl AccountRecord {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        AccountRecord {
            identifier: identifier.into(),
            display_name: display_name.into(),
            account_id: account_id.into(),
        }
    }

    pub fn normalized_identifier(&self) -> String {
        normalize_identifier(&self.identifier)
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.display_name)
    }

    /// Lookup key used for matching and uniqueness checks
    pub fn key(&self) -> (String, String) {
        (self.normalized_identifier(), self.normalized_name())
    }

    pub fn matches(&self, normalized_identifier: &str, normalized_name: &str) -> bool {
        self.normalized_identifier() == normalized_identifier
            && self.normalized_name() == normalized_name
    }

    /// Mask an account id for listings
    ///
    /// Example: "30101.hong@school.example" → "30***@school.example"
    pub fn mask_account_id(account_id: &str) -> String {
        let (local, domain) = match account_id.split_once('@') {
            Some((local, domain)) => (local, Some(domain)),
            None => (account_id, None),
        };

        let visible: String = local.chars().take(2).collect();
        match domain {
            Some(domain) => format!("{}***@{}", visible, domain),
            None => format!("{}***", visible),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
