//! Record model services

pub mod record_sets;

pub use record_sets::{
    canonical_name, domain_name, effective_ttl, from_record_sets, to_record_sets, DEFAULT_TTL,
    SUPPORTED_TTLS,
};
