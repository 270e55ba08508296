//! DNS provider trait definitions
//!
//! The generic record model used by DNS automation tooling (ACME DNS-01
//! solvers, dynamic DNS updaters): a flat list of single-value records, and
//! a uniform list/append/set/delete contract over any provider.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::DnsError;

/// A single-value DNS record
///
/// Multi-value records (several TXT strings for one name) are represented as
/// several `Record`s sharing the same name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Relative (`www`), zone-qualified (`www.example.com`) or
    /// fully-qualified (`www.example.com.`) name
    pub name: String,
    pub record_type: String,
    pub value: String,
    /// Zero means "provider default"
    pub ttl: Duration,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl,
        }
    }

    /// TTL in whole seconds, saturating at `u32::MAX`
    pub fn ttl_secs(&self) -> u32 {
        u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name,
            self.ttl.as_secs(),
            self.record_type,
            self.value
        )
    }
}

/// Core DNS provider trait
///
/// Every operation takes the zone with or without its trailing dot.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Short provider identifier, used in logs
    fn provider_name(&self) -> &'static str;

    /// List all records in the zone
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, DnsError>;

    /// Add records to the zone, returning the records that were added
    async fn append_records(&self, zone: &str, records: &[Record])
        -> Result<Vec<Record>, DnsError>;

    /// Create or replace records in the zone, returning the records that were updated
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, DnsError>;

    /// Remove records from the zone, returning the records that were deleted
    async fn delete_records(&self, zone: &str, records: &[Record])
        -> Result<Vec<Record>, DnsError>;
}
