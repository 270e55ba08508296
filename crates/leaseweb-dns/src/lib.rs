//! Leaseweb DNS provider
//!
//! This crate manages DNS records hosted at Leaseweb behind a generic,
//! provider-agnostic contract: list, append, set (upsert) and delete over a
//! flat list of single-value [`Record`]s.
//!
//! # Record sets
//!
//! Leaseweb stores DNS state as resource record sets: one name and type with
//! a single TTL and an array of values. Writes replace a whole set, so the
//! provider merges records sharing a name and type into one set before
//! sending them, and expands sets back into single records when reading.
//!
//! - Names are canonicalized against the zone: `www`, `www.example.com` and
//!   `www.example.com.` all address `www.example.com.`
//! - TTLs must be one of 60, 300, 1800, 3600, 14400, 28800, 43200 or 86400
//!   seconds; anything else (including unset) becomes 60
//! - Records of one set that ask for different TTLs are rejected
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use leaseweb_dns::{DnsProvider, LeasewebCredentials, LeasewebProvider, Record};
//!
//! let provider = LeasewebProvider::new(LeasewebCredentials::new("api-key"))?;
//!
//! provider
//!     .append_records(
//!         "example.com.",
//!         &[Record::new("_acme-challenge", "TXT", "token", Duration::from_secs(60))],
//!     )
//!     .await?;
//!
//! for record in provider.get_records("example.com.").await? {
//!     println!("{}", record);
//! }
//! ```

pub mod api;
pub mod errors;
pub mod providers;
pub mod services;

// Re-export main types
pub use api::{LeasewebClient, RecordSet, RecordSetApi};
pub use errors::{DnsError, TtlConflict};
pub use providers::{DnsProvider, LeasewebCredentials, LeasewebProvider, Record};
