//! Twitter lookups for chat channels
//!
//! `TwitterClient` verifies its credentials once at construction and then
//! serves the channel commands: timelines, single tweets, user profiles,
//! search, trends, WOEID lookup and rate-limit status. Each command returns
//! the reply lines to post, or an `Error` whose message is shown instead.

mod client;
mod models;
mod requests;

pub use client::TwitterClient;
pub use models::{
    provider_error, AvailableLocation, ProviderError, RateLimitStatus, RateLimitWindow,
    SearchResponse, StatusRef, TrendLocation, TrendName, TrendPlace, Tweet, User,
};
pub use requests::{format_reset, resolve_count, SearchRequest, TimelineRequest, TrendsRequest};
