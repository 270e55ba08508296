//! Leaseweb domains API wire types
//!
//! Only the fields this crate reads or writes are declared.
//! See https://developer.leaseweb.com/api-docs/domains_v2.html

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource record set: every value sharing one name, type and TTL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Fully-qualified, dot-terminated name (e.g. `www.example.com.`)
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: Vec<String>,
    pub ttl: u32,
}

impl RecordSet {
    /// Whether both sets address the same `(name, type)` path on the API
    pub fn same_key(&self, other: &RecordSet) -> bool {
        self.name == other.name && self.record_type == other.record_type
    }
}

/// Response of `GET /domains/{domainName}/resourceRecordSets`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetList {
    #[serde(default)]
    pub resource_record_sets: Vec<RecordSet>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Option<ListMetadata>,
}

/// Pagination block of list responses; only the total is read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMetadata {
    #[serde(default)]
    pub total_count: usize,
}

/// Body of `PUT /domains/{domainName}/resourceRecordSets/{name}/{type}`
#[derive(Debug, Serialize)]
pub struct UpdateRecordSetRequest<'a> {
    pub content: &'a [String],
    pub ttl: u32,
}

impl<'a> From<&'a RecordSet> for UpdateRecordSetRequest<'a> {
    fn from(set: &'a RecordSet) -> Self {
        Self {
            content: &set.content,
            ttl: set.ttl,
        }
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, ignoring payloads that carry none of the known fields
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .filter(|parsed| *parsed != ApiErrorBody::default())
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .error_message
            .as_deref()
            .or(self.user_message.as_deref())
            .unwrap_or("unknown error");
        write!(f, "{}", message)?;
        if let Some(code) = &self.error_code {
            write!(f, " (code {})", code)?;
        }
        if let Some(user_message) = &self.user_message {
            if self.error_message.is_some() {
                write!(f, ", user message: {}", user_message)?;
            }
        }
        if let Some(correlation_id) = &self.correlation_id {
            write!(f, ", correlation id: {}", correlation_id)?;
        }
        Ok(())
    }
}
