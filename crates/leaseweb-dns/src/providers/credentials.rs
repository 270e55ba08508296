//! Leaseweb credentials
//!
//! Generate an API key in the Leaseweb customer portal under
//! Administration -> API Key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DnsError;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "LEASEWEB_API_KEY";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "LEASEWEB_API_URL";

/// Leaseweb API credentials
#[derive(Clone, Serialize, Deserialize)]
pub struct LeasewebCredentials {
    /// API key sent in the `X-LSW-Auth` header
    #[serde(alias = "api_token")]
    pub api_key: String,
}

impl LeasewebCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Load credentials from `LEASEWEB_API_KEY`
    pub fn from_env() -> Result<Self, DnsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DnsError> {
        let api_key = lookup(API_KEY_ENV).ok_or_else(|| {
            DnsError::InvalidCredentials(format!("{} is not set", API_KEY_ENV))
        })?;
        let credentials = Self::new(api_key.trim());
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn validate(&self) -> Result<(), DnsError> {
        if self.api_key.trim().is_empty() {
            return Err(DnsError::InvalidCredentials(
                "Leaseweb API key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for LeasewebCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeasewebCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
