//! Cursor state module
//!
//! Tracks the newest item id seen per (channel, query) so repeated
//! `--new` lookups only fetch newer items.
//!
//! # Overview
//!
//! The state module provides:
//! - `CursorMap` - The persisted `{ channel: { query: id } }` document
//! - `CursorStore` - Shared in-memory map with whole-document flushes
//! - `CursorBackend` - Where flushed documents live (`FileBackend`, `MemoryBackend`)

mod backend;
mod store;
mod types;

pub use backend::{CursorBackend, FileBackend, MemoryBackend};
pub use store::CursorStore;
pub use types::CursorMap;

#[cfg(test)]
mod store_tests;
