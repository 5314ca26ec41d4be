//! HTTP module
//!
//! Provides the signed provider caller and the link shortener.
//!
//! # Features
//!
//! - **Best-effort calls**: `ApiClient::call` never fails, it returns `None`
//! - **Bounded retries**: one retry by default, configurable with backoff
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Signing**: Every provider request carries an OAuth 1.0a header

mod client;
mod rate_limit;
mod shortener;

pub use client::{ApiClient, ApiClientConfig, RetryPolicy};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use shortener::UrlShortener;

#[cfg(test)]
mod tests;
