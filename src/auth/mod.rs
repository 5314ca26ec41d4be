//! Authentication module
//!
//! Holds the four OAuth 1.0a secrets and signs provider requests with them.
//!
//! `Credentials` can only be built when every secret is present, so a
//! signer never exists for an incomplete credential set.

mod signer;
mod types;

pub use signer::{encode_query, percent_encode, OAuthSigner};
pub use types::Credentials;

#[cfg(test)]
mod tests;
