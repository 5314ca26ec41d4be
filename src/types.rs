//! Common types used throughout Tweety
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Ordered query parameters for a single API call
pub type Params = Vec<(String, String)>;

// ============================================================================
// Provider Identifiers
// ============================================================================

/// Identifier of a provider item (tweet, user, location)
///
/// The provider hands out numeric ids, but older state files and some
/// endpoints carry them as strings, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// Numeric id as returned in `id` fields
    Number(u64),
    /// String id as returned in `id_str` fields
    Text(String),
}

impl ItemId {
    /// Numeric value of the id, if it has one
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ItemId::Number(n) => Some(*n),
            ItemId::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Text(s)
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy between retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    #[default]
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    Exponential,
}

// ============================================================================
// Search Result Type
// ============================================================================

/// Ordering requested from the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Most popular results
    Popular,
    /// Popular and recent results
    Mixed,
    /// Most recent results
    Recent,
}

impl SearchType {
    /// Wire value for the `result_type` parameter
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Popular => "popular",
            SearchType::Mixed => "mixed",
            SearchType::Recent => "recent",
        }
    }
}
