//! Best-effort link shortener
//!
//! One unauthenticated GET, no retry. Failures are logged and the link is
//! simply left out of the output.

use crate::config::ApiSettings;
use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::error;

/// Client for a `?url=`-style shortening service
#[derive(Debug, Clone)]
pub struct UrlShortener {
    client: Client,
    endpoint: String,
}

impl UrlShortener {
    /// Create a shortener for the given service endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a shortener from API settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        Self::new(
            settings.shortener_url.clone(),
            Duration::from_secs(settings.shortener_timeout_secs),
        )
    }

    /// Shorten `url`, or `None` if the service fails
    pub async fn shorten(&self, url: &str) -> Option<String> {
        match self.request(url).await {
            Ok(short) if !short.is_empty() => Some(short),
            Ok(_) => {
                error!("Empty response retrieving tiny url for {url}");
                None
            }
            Err(e) => {
                error!("ERROR retrieving tiny url: {e}");
                None
            }
        }
    }

    async fn request(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?.trim().to_string())
    }
}
