//! Leaseweb domains API: wire types and HTTP client

pub mod client;
pub mod models;

pub use client::{LeasewebClient, RecordSetApi, API_KEY_HEADER, LEASEWEB_API_BASE};
pub use models::{ApiErrorBody, ListMetadata, RecordSet, RecordSetList, UpdateRecordSetRequest};
