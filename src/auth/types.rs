//! Credential types

use crate::config::CredentialsConfig;
use crate::error::{Error, Result};
use std::fmt;

/// Complete signing material: consumer key/secret and access key/secret
///
/// Immutable once constructed. `Debug` never prints the secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_key: String,
    access_secret: String,
}

impl Credentials {
    /// Create credentials from the four secrets
    ///
    /// Fails with an itemized error if any value is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(&CredentialsConfig::new(
            consumer_key,
            consumer_secret,
            access_key,
            access_secret,
        ))
    }

    /// Build credentials from configured values, naming every missing one
    pub fn from_config(config: &CredentialsConfig) -> Result<Self> {
        let missing = config.missing();
        if !missing.is_empty() {
            return Err(Error::MissingCredentials { fields: missing });
        }

        let take = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
        Ok(Self {
            consumer_key: take(&config.consumer_key),
            consumer_secret: take(&config.consumer_secret),
            access_key: take(&config.access_key),
            access_secret: take(&config.access_secret),
        })
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}
