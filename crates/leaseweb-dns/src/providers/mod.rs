//! DNS provider implementations
//!
//! This module contains the generic provider contract and its Leaseweb
//! implementation.

pub mod credentials;
pub mod leaseweb;
pub mod traits;

// Re-export commonly used types
pub use credentials::LeasewebCredentials;
pub use leaseweb::LeasewebProvider;
pub use traits::{DnsProvider, Record};
