//! Provider response shapes
//!
//! Only the fields that get displayed are modelled; everything else in
//! the provider's records is ignored.

use crate::format::{relative_time, unescape, TweetRecord, UserRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A status as returned by timeline, show and search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: u64,
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: String,
    pub user: User,
    #[serde(default)]
    pub retweeted_status: Option<StatusRef>,
}

/// Reference to another status
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRef {
    pub id: u64,
    #[serde(default)]
    pub id_str: Option<String>,
}

impl StatusRef {
    fn id_string(&self) -> String {
        self.id_str.clone().unwrap_or_else(|| self.id.to_string())
    }
}

impl Tweet {
    /// The status id, preferring the exact string form
    pub fn id_string(&self) -> String {
        self.id_str.clone().unwrap_or_else(|| self.id.to_string())
    }

    /// Extended text when present, else the classic text
    pub fn body(&self) -> String {
        let raw = self
            .full_text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.text.as_deref())
            .unwrap_or_default();
        unescape(raw)
    }

    /// Reduce to the displayed fields
    ///
    /// `with_retweet` controls whether the reshared status is linked.
    pub fn to_record(&self, with_retweet: bool) -> TweetRecord {
        TweetRecord {
            nick: unescape(&self.user.screen_name),
            name: unescape(&self.user.name),
            verified: self.user.verified,
            text: self.body(),
            time: relative_time(&self.created_at),
            tweet_id: self.id_string(),
            retweet_id: if with_retweet {
                self.retweeted_status.as_ref().map(StatusRef::id_string)
            } else {
                None
            },
        }
    }
}

/// A user profile
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub friends_count: u64,
    #[serde(default)]
    pub statuses_count: u64,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// Reduce to the displayed fields
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            screen_name: unescape(&self.screen_name),
            name: unescape(&self.name),
            protected: self.protected,
            url: self.url.clone(),
            description: self.description.as_deref().map(unescape),
            friends: self.friends_count,
            statuses: self.statuses_count,
            followers: self.followers_count,
            signup: relative_time(&self.created_at),
            location: self.location.clone(),
        }
    }
}

/// `search/tweets` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Tweet>,
}

/// One element of the `trends/place` response
#[derive(Debug, Clone, Deserialize)]
pub struct TrendPlace {
    #[serde(default)]
    pub trends: Vec<TrendName>,
    #[serde(default)]
    pub locations: Vec<TrendLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendName {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendLocation {
    pub name: String,
}

/// One element of the `trends/available` response
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableLocation {
    pub name: String,
    pub woeid: u64,
}

/// `application/rate_limit_status` response
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitStatus {
    /// resource family -> endpoint -> window
    pub resources: HashMap<String, HashMap<String, RateLimitWindow>>,
}

impl RateLimitStatus {
    /// Window for an endpoint, e.g. `("statuses", "/statuses/show/:id")`
    pub fn window(&self, family: &str, endpoint: &str) -> Option<&RateLimitWindow> {
        self.resources.get(family)?.get(endpoint)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitWindow {
    #[serde(default)]
    pub limit: i64,
    pub remaining: i64,
    /// Unix time at which the window resets
    pub reset: i64,
}

/// Structured error reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderError {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    /// Code for "page/location/user does not exist"
    pub const NOT_FOUND: i64 = 34;

    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }
}

/// First entry of an `{"errors": [...]}` payload, if `value` is one
pub fn provider_error(value: &Value) -> Option<ProviderError> {
    let first = value.get("errors")?.as_array()?.first()?;
    serde_json::from_value(first.clone()).ok()
}
