//! Cursor document types
//!
//! Serialized as `{ "#channel": { "query": 1234, "other": null } }`.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-channel cursors: query key to last-seen id (or none yet)
pub type ChannelCursors = BTreeMap<String, Option<ItemId>>;

/// Complete cursor document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CursorMap {
    channels: BTreeMap<String, ChannelCursors>,
}

impl CursorMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-seen id for a channel and query
    pub fn get(&self, channel: &str, key: &str) -> Option<&ItemId> {
        self.channels.get(channel)?.get(key)?.as_ref()
    }

    /// Record the last-seen id for a channel and query
    pub fn set(&mut self, channel: &str, key: &str, id: ItemId) {
        self.channel_mut(channel).insert(key.to_string(), Some(id));
    }

    /// Register a query without a cursor, keeping any existing one
    pub fn touch(&mut self, channel: &str, key: &str) {
        self.channel_mut(channel)
            .entry(key.to_string())
            .or_insert(None);
    }

    /// Cursors for one channel
    pub fn channel(&self, channel: &str) -> Option<&ChannelCursors> {
        self.channels.get(channel)
    }

    /// Number of channels with at least one registered query
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel has been registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn channel_mut(&mut self, channel: &str) -> &mut ChannelCursors {
        self.channels.entry(channel.to_string()).or_default()
    }
}
