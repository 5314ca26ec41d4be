//! # Tweety
//!
//! Twitter lookups for chat channels.
//!
//! ## Features
//!
//! - **Signed API calls**: OAuth 1.0a HMAC-SHA1 headers on every provider request
//! - **Flat retry**: One retry by default, with optional backoff and rate limiting
//! - **Channel commands**: Timelines, tweets, profiles, search, trends and WOEIDs
//! - **Since-id cursors**: Per-channel "newest seen" ids persisted as JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tweety::config::Config;
//! use tweety::state::CursorStore;
//! use tweety::twitter::{TimelineRequest, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> tweety::Result<()> {
//!     let config = Config::from_file("tweety.yaml")?;
//!     let cursors = CursorStore::from_file(&config.state_file).await?;
//!     let client = TwitterClient::connect(config, cursors).await?;
//!
//!     for line in client.timeline("#rust", TimelineRequest::new("rustlang")).await? {
//!         println!("{line}");
//!     }
//!     client.cursors().flush().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 cli (one-shot / shell)                    │
//! └─────────────────────────────┬─────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┴─────────────────────────────┐
//! │                  twitter::TwitterClient                   │
//! ├──────────┬──────────────┬───────────────┬─────────────────┤
//! │   auth   │     http     │     state     │     format      │
//! │  OAuth   │ retry, rate  │ CursorStore   │ tweet lines,    │
//! │  1.0a    │ limit, short │ JSON flush    │ relative time   │
//! └──────────┴──────────────┴───────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// YAML configuration
pub mod config;

/// OAuth 1.0a request signing
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Since-id cursor persistence
pub mod state;

/// Display formatting
pub mod format;

/// Channel commands against the Twitter API
pub mod twitter;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use twitter::TwitterClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
