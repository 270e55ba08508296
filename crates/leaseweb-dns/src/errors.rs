//! DNS provider error types

use std::fmt;

use thiserror::Error;

use crate::api::models::ApiErrorBody;

/// Two records of one merge group asked for different TTLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlConflict {
    /// Canonical (fully-qualified, dot-terminated) record name
    pub name: String,
    pub record_type: String,
    /// TTL of the first record seen in the group
    pub first_ttl: u32,
    /// TTL of the conflicting record
    pub other_ttl: u32,
}

impl fmt::Display for TtlConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Found different TTL values for {} ({}): {} and {}",
            self.name, self.record_type, self.first_ttl, self.other_ttl
        )
    }
}

fn join_conflicts(conflicts: &[TtlConflict]) -> String {
    conflicts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_api_error(message: &str, details: &Option<ApiErrorBody>) -> String {
    match details {
        Some(body) => body.to_string(),
        None if message.is_empty() => "<empty body>".to_string(),
        None => message.to_string(),
    }
}

/// DNS provider errors
#[derive(Error, Debug)]
pub enum DnsError {
    #[error("Validation error: {}", join_conflicts(.0))]
    TtlConflicts(Vec<TtlConflict>),

    #[error("Received status {status} from Leaseweb API: {}", describe_api_error(.message, .details))]
    Api {
        status: u16,
        /// Raw response body
        message: String,
        /// Structured error body, when the response carried one
        details: Option<ApiErrorBody>,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl DnsError {
    /// HTTP status code of a vendor error response
    pub fn status(&self) -> Option<u16> {
        match self {
            DnsError::Api { status, .. } => Some(*status),
            DnsError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DnsError::TtlConflicts(_))
    }
}
