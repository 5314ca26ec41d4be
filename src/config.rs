//! Configuration types
//!
//! The bot is configured from a single YAML document:
//!
//! ```yaml
//! credentials:
//!   consumer_key: ...
//!   consumer_secret: ...
//!   access_key: ...
//!   access_secret: ...
//! api:
//!   timeout_secs: 10
//!   max_retries: 1
//! state_file: tweety.json
//! defaults:
//!   max_results: 10
//! channels:
//!   "#news":
//!     hide_real_name: true
//!     add_short_url: true
//! ```

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Signing credentials (may be completed from the environment)
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Provider and shortener settings
    #[serde(default)]
    pub api: ApiSettings,

    /// Path of the since-id cursor file
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Seconds between periodic cursor flushes in shell mode
    #[serde(default = "default_flush_interval")]
    pub flush_interval_secs: u64,

    /// Settings used for channels without an override
    #[serde(default)]
    pub defaults: ChannelSettings,

    /// Per-channel overrides, keyed by channel name
    #[serde(default)]
    pub channels: HashMap<String, ChannelOverrides>,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("tweety.json")
}

fn default_flush_interval() -> u64 {
    300
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.credentials.fill_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Check numeric settings that would make every request fail
    pub fn validate(&self) -> Result<()> {
        self.defaults.validate("defaults")?;
        for (name, overrides) in &self.channels {
            self.defaults
                .merged(overrides)
                .validate(&format!("channels.{name}"))?;
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    /// Effective settings for a channel
    ///
    /// Channel names are matched case-insensitively, as IRC does.
    pub fn channel(&self, channel: &str) -> ChannelSettings {
        self.channels
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(channel))
            .map_or_else(
                || self.defaults.clone(),
                |(_, overrides)| self.defaults.merged(overrides),
            )
    }

    /// Flush interval as a duration
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs.max(1))
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Environment variables consulted for credentials missing from the file
pub const CREDENTIAL_ENV_VARS: [(&str, &str); 4] = [
    ("consumer_key", "TWEETY_CONSUMER_KEY"),
    ("consumer_secret", "TWEETY_CONSUMER_SECRET"),
    ("access_key", "TWEETY_ACCESS_KEY"),
    ("access_secret", "TWEETY_ACCESS_SECRET"),
];

/// Raw credential values as configured; any of them may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub consumer_key: Option<String>,
    #[serde(default)]
    pub consumer_secret: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub access_secret: Option<String>,
}

impl CredentialsConfig {
    /// Create a config with all four values set
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: Some(consumer_key.into()),
            consumer_secret: Some(consumer_secret.into()),
            access_key: Some(access_key.into()),
            access_secret: Some(access_secret.into()),
        }
    }

    /// Fill unset values from `TWEETY_*` environment variables
    pub fn fill_from_env(&mut self) {
        for (field, var) in CREDENTIAL_ENV_VARS {
            let slot = self.slot_mut(field);
            if slot.as_deref().map_or(true, str::is_empty) {
                if let Ok(value) = std::env::var(var) {
                    if !value.is_empty() {
                        *slot = Some(value);
                    }
                }
            }
        }
    }

    /// Names of the values that are unset or empty, in declaration order
    pub fn missing(&self) -> Vec<String> {
        [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_key", &self.access_key),
            ("access_secret", &self.access_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name.to_string())
        .collect()
    }

    fn slot_mut(&mut self, field: &str) -> &mut Option<String> {
        match field {
            "consumer_key" => &mut self.consumer_key,
            "consumer_secret" => &mut self.consumer_secret,
            "access_key" => &mut self.access_key,
            _ => &mut self.access_secret,
        }
    }
}

// ============================================================================
// API Settings
// ============================================================================

/// Provider endpoint, timeout and retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// REST base address; endpoint paths are appended with a `.json` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff between attempts
    #[serde(default)]
    pub backoff: BackoffType,

    /// First backoff delay
    #[serde(default)]
    pub initial_backoff_ms: u64,

    /// Upper bound on backoff delay
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Optional client-side rate limit
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Link-shortening service
    #[serde(default = "default_shortener_url")]
    pub shortener_url: String,

    /// Timeout for the link-shortening service
    #[serde(default = "default_shortener_timeout_secs")]
    pub shortener_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_max_backoff_ms() -> u64 {
    5_000
}

fn default_shortener_url() -> String {
    "http://tinyurl.com/api-create.php".to_string()
}

fn default_shortener_timeout_secs() -> u64 {
    5
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: 0,
            max_backoff_ms: default_max_backoff_ms(),
            requests_per_second: None,
            shortener_url: default_shortener_url(),
            shortener_timeout_secs: default_shortener_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Settings pointing both services at a local address (used by tests)
    pub fn local(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            shortener_url: format!("{}/api-create.php", base_url.trim_end_matches('/')),
            base_url,
            ..Self::default()
        }
    }
}

// ============================================================================
// Channel Settings
// ============================================================================

/// Display toggles and result limits for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Omit the author's display name from tweet lines
    #[serde(default)]
    pub hide_real_name: bool,

    /// Append shortened links to the tweet
    #[serde(default)]
    pub add_short_url: bool,

    /// Colour the author handle instead of bolding it
    #[serde(default)]
    pub output_color_tweets: bool,

    /// Colour URLs inside tweet text
    #[serde(default)]
    pub color_tweet_urls: bool,

    /// Always exclude hashtags from trends
    #[serde(default)]
    pub hide_hashtags_trends: bool,

    /// Default location for trends (1 = worldwide)
    #[serde(default = "default_woeid")]
    pub woeid: u64,

    /// Tweets shown by a timeline lookup without `--num`
    #[serde(default = "default_results")]
    pub default_results: u32,

    /// Upper bound for timeline `--num`
    #[serde(default = "default_max")]
    pub max_results: u32,

    /// Tweets shown by a search without `--num`
    #[serde(default = "default_search_results")]
    pub default_search_results: u32,

    /// Upper bound for search `--num`
    #[serde(default = "default_max")]
    pub max_search_results: u32,
}

fn default_woeid() -> u64 {
    1
}

fn default_results() -> u32 {
    1
}

fn default_search_results() -> u32 {
    3
}

fn default_max() -> u32 {
    10
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            hide_real_name: false,
            add_short_url: false,
            output_color_tweets: false,
            color_tweet_urls: false,
            hide_hashtags_trends: false,
            woeid: default_woeid(),
            default_results: default_results(),
            max_results: default_max(),
            default_search_results: default_search_results(),
            max_search_results: default_max(),
        }
    }
}

impl ChannelSettings {
    /// Apply overrides on top of these settings
    pub fn merged(&self, o: &ChannelOverrides) -> Self {
        Self {
            hide_real_name: o.hide_real_name.unwrap_or(self.hide_real_name),
            add_short_url: o.add_short_url.unwrap_or(self.add_short_url),
            output_color_tweets: o.output_color_tweets.unwrap_or(self.output_color_tweets),
            color_tweet_urls: o.color_tweet_urls.unwrap_or(self.color_tweet_urls),
            hide_hashtags_trends: o.hide_hashtags_trends.unwrap_or(self.hide_hashtags_trends),
            woeid: o.woeid.unwrap_or(self.woeid),
            default_results: o.default_results.unwrap_or(self.default_results),
            max_results: o.max_results.unwrap_or(self.max_results),
            default_search_results: o
                .default_search_results
                .unwrap_or(self.default_search_results),
            max_search_results: o.max_search_results.unwrap_or(self.max_search_results),
        }
    }

    fn validate(&self, scope: &str) -> Result<()> {
        if self.max_results == 0 || self.max_search_results == 0 {
            return Err(Error::config(format!(
                "{scope}: max_results and max_search_results must be at least 1"
            )));
        }
        if !(1..=self.max_results).contains(&self.default_results) {
            return Err(Error::config(format!(
                "{scope}: default_results must be between 1 and {}",
                self.max_results
            )));
        }
        if !(1..=self.max_search_results).contains(&self.default_search_results) {
            return Err(Error::config(format!(
                "{scope}: default_search_results must be between 1 and {}",
                self.max_search_results
            )));
        }
        Ok(())
    }
}

/// Partial channel settings; unset fields fall back to `defaults`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelOverrides {
    #[serde(default)]
    pub hide_real_name: Option<bool>,
    #[serde(default)]
    pub add_short_url: Option<bool>,
    #[serde(default)]
    pub output_color_tweets: Option<bool>,
    #[serde(default)]
    pub color_tweet_urls: Option<bool>,
    #[serde(default)]
    pub hide_hashtags_trends: Option<bool>,
    #[serde(default)]
    pub woeid: Option<u64>,
    #[serde(default)]
    pub default_results: Option<u32>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub default_search_results: Option<u32>,
    #[serde(default)]
    pub max_search_results: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.max_retries, 1);
        assert_eq!(config.api.backoff, BackoffType::Constant);
        assert_eq!(config.state_file, PathBuf::from("tweety.json"));
        assert_eq!(config.defaults, ChannelSettings::default());
        assert_eq!(config.defaults.max_search_results, 10);
    }

    #[test]
    fn test_channel_overrides_merge() {
        let yaml = r##"
defaults:
  max_results: 5
channels:
  "#News":
    hide_real_name: true
    max_results: 3
"##;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        let news = config.channel("#news");
        assert!(news.hide_real_name);
        assert_eq!(news.max_results, 3);
        assert_eq!(news.default_search_results, 3);

        let other = config.channel("#other");
        assert!(!other.hide_real_name);
        assert_eq!(other.max_results, 5);
    }

    #[test]
    fn test_missing_credentials_itemized() {
        let creds = CredentialsConfig {
            consumer_key: Some("ck".to_string()),
            consumer_secret: Some("  ".to_string()),
            access_key: None,
            access_secret: Some("as".to_string()),
        };
        assert_eq!(creds.missing(), vec!["consumer_secret", "access_key"]);

        let full = CredentialsConfig::new("a", "b", "c", "d");
        assert!(full.missing().is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_default() {
        let yaml = r"
defaults:
  default_results: 20
  max_results: 10
";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("default_results"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/tweety.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_local_api_settings() {
        let api = ApiSettings::local("http://127.0.0.1:9999/");
        assert_eq!(api.base_url, "http://127.0.0.1:9999/");
        assert_eq!(api.shortener_url, "http://127.0.0.1:9999/api-create.php");
    }
}
