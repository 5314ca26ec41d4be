//! Command options and their local validation

use crate::error::{Error, Result};
use crate::types::SearchType;

/// Options for a user timeline lookup
#[derive(Debug, Clone, Default)]
pub struct TimelineRequest {
    /// Screen name, with or without a leading `@`
    pub nick: String,
    /// Number of tweets; channel default when unset
    pub num: Option<i64>,
    /// Leave out retweets
    pub no_retweets: bool,
    /// Leave out replies
    pub no_replies: bool,
    /// Only tweets newer than the channel's cursor; failures stay quiet
    pub new: bool,
}

impl TimelineRequest {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            ..Self::default()
        }
    }
}

/// Options for a search
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub term: String,
    pub num: Option<i64>,
    pub result_type: Option<SearchType>,
    /// ISO-639 language code; `en` when unset
    pub lang: Option<String>,
    pub no_retweets: bool,
    pub new: bool,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }
}

/// Options for a trends lookup
#[derive(Debug, Clone, Default)]
pub struct TrendsRequest {
    /// Place name, WOEID, or "world"; channel default when unset
    pub location: Option<String>,
    pub exclude_hashtags: bool,
}

/// Pick the requested count or the default, enforcing `1..=max`
pub fn resolve_count(requested: Option<i64>, default: u32, max: u32) -> Result<u32> {
    match requested {
        None => Ok(default.clamp(1, max.max(1))),
        Some(n) if n >= 1 && n <= i64::from(max) => Ok(n as u32),
        Some(n) => Err(Error::InvalidCount { value: n, max }),
    }
}

/// Time until a rate-limit window resets, as `XmYs`
pub fn format_reset(reset: i64, now: i64) -> String {
    let delta = reset - now;
    format!("{}m{}s", delta.div_euclid(60), delta.rem_euclid(60))
}
