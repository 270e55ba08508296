//! Leaseweb DNS provider implementation
//!
//! Implements the list/append/set/delete contract on top of Leaseweb's
//! resource record set API. The API has no multi-set transaction or
//! compare-and-swap, so every operation holds the provider's lock for its
//! whole read-translate-write sequence: at most one operation runs at a time
//! per provider instance, across all zones.
//!
//! Record sets are written one after another. The first failing call aborts
//! the operation; sets written before it stay written.
//!
//! API documentation: https://developer.leaseweb.com/api-docs/domains_v2.html

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::credentials::{LeasewebCredentials, API_URL_ENV};
use super::traits::{DnsProvider, Record};
use crate::api::client::{LeasewebClient, RecordSetApi};
use crate::errors::DnsError;
use crate::services::record_sets::{domain_name, from_record_sets, to_record_sets};

/// Leaseweb DNS provider
pub struct LeasewebProvider<A: RecordSetApi = LeasewebClient> {
    api: A,
    lock: Mutex<()>,
}

impl LeasewebProvider<LeasewebClient> {
    /// Create a provider talking to the public Leaseweb API
    pub fn new(credentials: LeasewebCredentials) -> Result<Self, DnsError> {
        Ok(Self::with_api(LeasewebClient::new(credentials)?))
    }

    /// Create a provider from `LEASEWEB_API_KEY` (and optionally `LEASEWEB_API_URL`)
    pub fn from_env() -> Result<Self, DnsError> {
        let credentials = LeasewebCredentials::from_env()?;
        let client = match std::env::var(API_URL_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => {
                LeasewebClient::with_base_url(credentials, base_url.trim().to_string())?
            }
            _ => LeasewebClient::new(credentials)?,
        };
        Ok(Self::with_api(client))
    }
}

impl<A: RecordSetApi> LeasewebProvider<A> {
    /// Create a provider on top of any record set API implementation
    pub fn with_api(api: A) -> Self {
        Self {
            api,
            lock: Mutex::new(()),
        }
    }

    /// Record set API the provider talks to
    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: RecordSetApi> DnsProvider for LeasewebProvider<A> {
    fn provider_name(&self) -> &'static str {
        "leaseweb"
    }

    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, DnsError> {
        let _guard = self.lock.lock().await;

        let sets = self.api.list_record_sets(domain_name(zone)).await?;
        let records = from_record_sets(&sets);

        debug!(
            "Listed {} records in {} record sets for zone {}",
            records.len(),
            sets.len(),
            zone
        );

        Ok(records)
    }

    /// Creates one record set per `(name, type)` group without consulting
    /// existing state; callers use it for names and types not yet present.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, DnsError> {
        let _guard = self.lock.lock().await;

        let domain = domain_name(zone);
        let sets = to_record_sets(zone, records)?;

        for set in &sets {
            self.api.create_record_set(domain, set).await?;
        }

        info!(
            "Appended {} records as {} record sets to zone {}",
            records.len(),
            sets.len(),
            zone
        );

        // The API does not report which values it stored; reaching this
        // point means every set was accepted.
        Ok(records.to_vec())
    }

    /// Updates record sets that already exist and creates the others.
    ///
    /// A set exists when the zone lists one with the same canonical name and
    /// upper-cased type. Only updated sets contribute to the returned records;
    /// sets created here are not reported.
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>, DnsError> {
        let _guard = self.lock.lock().await;

        let domain = domain_name(zone);
        let existing = self.api.list_record_sets(domain).await?;
        let sets = to_record_sets(zone, records)?;

        let mut updated = Vec::new();
        let mut created = 0usize;

        for set in &sets {
            if existing.iter().any(|e| e.same_key(set)) {
                let response = self.api.update_record_set(domain, set).await?;
                updated.extend(from_record_sets(std::slice::from_ref(&response)));
            } else {
                self.api.create_record_set(domain, set).await?;
                created += 1;
            }
        }

        info!(
            "Set records in zone {}: {} record sets updated, {} created",
            zone,
            sets.len() - created,
            created
        );

        Ok(updated)
    }

    /// Deletes whole record sets by name and type; values and TTLs of the
    /// given records are not compared. Missing sets count as deleted.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, DnsError> {
        let _guard = self.lock.lock().await;

        let domain = domain_name(zone);
        let sets = to_record_sets(zone, records)?;

        for set in &sets {
            self.api
                .delete_record_set(domain, &set.name, &set.record_type)
                .await?;
        }

        info!(
            "Deleted {} record sets from zone {}",
            sets.len(),
            zone
        );

        Ok(records.to_vec())
    }
}
