//! Error types for Tweety
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The `Display` form of the user-facing variants is exactly what gets
//! shown in a channel after an `ERROR: ` prefix.

use thiserror::Error;

/// The main error type for Tweety
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required credential(s): {}. Set all four keys and try again.", .fields.join(", "))]
    MissingCredentials { fields: Vec<String> },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Authorization Errors
    // ============================================================================
    #[error("Twitter is not authorized. Please check logs before running this command.")]
    Unauthorized,

    #[error("OAuth signing failed: {message}")]
    Signing { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Provider Errors
    // ============================================================================
    #[error("{message}")]
    NotFound { message: String },

    #[error("{code} {message}")]
    Provider { code: i64, message: String },

    #[error("{context}")]
    NoData { context: String },

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("'{value}' is not a valid number of tweets. Range is between 1 and {max}.")]
    InvalidCount { value: i64, max: u32 },

    #[error("Invalid value '{value}' for {option}: {message}")]
    InvalidOption {
        option: String,
        value: String,
        message: String,
    },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a not-found error carrying the user-facing message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a provider error from a code/message pair
    pub fn provider(code: i64, message: impl Into<String>) -> Self {
        Self::Provider {
            code,
            message: message.into(),
        }
    }

    /// Create a "no data" error
    pub fn no_data(context: impl Into<String>) -> Self {
        Self::NoData {
            context: context.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Transport failures and every non-2xx status qualify; the caller's
    /// retry policy bounds how often.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// Whether this error was decided locally, before any provider call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized
                | Error::InvalidCount { .. }
                | Error::InvalidOption { .. }
                | Error::MissingCredentials { .. }
        )
    }
}

/// Result type alias for Tweety
pub type Result<T> = std::result::Result<T, Error>;
