// 🔎 Resolver - raw form input → LookupResult
//
// normalize → validate → query directory → typed result
//
// Total over its input: every pair of strings maps to exactly one
// LookupResult, nothing panics and nothing is retried.

use crate::directory::Directory;
use crate::ime::{Dubeolsik, InputMethod};
use crate::normalize::{is_numeric_identifier, normalize_identifier, normalize_name_smart};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// QUERY / RESULT TYPES
// ============================================================================

/// Raw form input, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    #[serde(rename = "identifier")]
    pub raw_identifier: String,
    #[serde(rename = "name")]
    pub raw_name: String,
}

impl LookupQuery {
    pub fn new(raw_identifier: impl Into<String>, raw_name: impl Into<String>) -> Self {
        LookupQuery {
            raw_identifier: raw_identifier.into(),
            raw_name: raw_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// Identifier or name is empty after normalization
    MissingFields,
    /// Identifier contains something other than decimal digits
    IdentifierNotNumeric,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::MissingFields => "missing-fields",
            InvalidReason::IdentifierNotNumeric => "identifier-not-numeric",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LookupResult {
    /// Input failed format validation
    Invalid { reason: InvalidReason },
    /// Valid input, no matching record
    NotFound,
    /// Exactly one record matched
    Found { account_id: String },
}

impl LookupResult {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found { .. })
    }

    pub fn account_id(&self) -> Option<&str> {
        match self {
            LookupResult::Found { account_id } => Some(account_id),
            _ => None,
        }
    }

    /// Short outcome label, safe to log (carries no personal data)
    pub fn kind(&self) -> &'static str {
        match self {
            LookupResult::Invalid { reason } => reason.as_str(),
            LookupResult::NotFound => "not-found",
            LookupResult::Found { .. } => "found",
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Validates and normalizes raw input, then queries the directory
#[derive(Debug, Clone)]
pub struct Resolver<D, I = Dubeolsik> {
    directory: D,
    ime: I,
}

impl<D: Directory> Resolver<D, Dubeolsik> {
    /// Resolver using the standard 2-set keyboard
    pub fn new(directory: D) -> Self {
        Resolver {
            directory,
            ime: Dubeolsik::new(),
        }
    }
}

impl<D: Directory, I: InputMethod> Resolver<D, I> {
    pub fn with_input_method(directory: D, ime: I) -> Self {
        Resolver { directory, ime }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn input_method(&self) -> &I {
        &self.ime
    }

    pub fn resolve(&self, raw_identifier: &str, raw_name: &str) -> LookupResult {
        let identifier = normalize_identifier(raw_identifier);
        let name = normalize_name_smart(raw_name, &self.ime);

        let result = if identifier.is_empty() || name.is_empty() {
            LookupResult::Invalid {
                reason: InvalidReason::MissingFields,
            }
        } else if !is_numeric_identifier(&identifier) {
            LookupResult::Invalid {
                reason: InvalidReason::IdentifierNotNumeric,
            }
        } else {
            match self.directory.find_match(&identifier, &name) {
                Some(record) => LookupResult::Found {
                    account_id: record.account_id.clone(),
                },
                None => LookupResult::NotFound,
            }
        };

        debug!(outcome = result.kind(), "lookup resolved");
        result
    }

    pub fn resolve_query(&self, query: &LookupQuery) -> LookupResult {
        self.resolve(&query.raw_identifier, &query.raw_name)
    }
}

// ============================================================================
// TESTS
// ============================================================================
