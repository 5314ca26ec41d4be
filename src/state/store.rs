//! Cursor store implementation
//!
//! The map lives in memory behind a lock shared by every command handler.
//! `flush` serializes a snapshot under the same lock and hands it to the
//! backend; concurrent flushes are serialized so temp files never collide.

use super::backend::{CursorBackend, FileBackend, MemoryBackend};
use super::types::CursorMap;
use crate::error::Result;
use crate::types::ItemId;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Shared since-id cursors with whole-document persistence
#[derive(Debug, Clone)]
pub struct CursorStore {
    map: Arc<RwLock<CursorMap>>,
    backend: Arc<dyn CursorBackend>,
    flush_lock: Arc<Mutex<()>>,
}

impl CursorStore {
    /// Load the store from a backend; an absent document starts empty
    pub async fn load(backend: Arc<dyn CursorBackend>) -> Result<Self> {
        let map = backend.load().await?.unwrap_or_else(|| {
            debug!("Creating new since_id DB");
            CursorMap::new()
        });

        Ok(Self {
            map: Arc::new(RwLock::new(map)),
            backend,
            flush_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Load the store from a JSON file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Arc::new(FileBackend::new(path))).await
    }

    /// An empty store that flushes to memory only
    pub fn in_memory() -> Self {
        Self {
            map: Arc::new(RwLock::new(CursorMap::new())),
            backend: Arc::new(MemoryBackend::new()),
            flush_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Last-seen id for a channel and query key
    pub async fn get(&self, channel: &str, key: &str) -> Option<ItemId> {
        self.map.read().await.get(channel, key).cloned()
    }

    /// Record the last-seen id; setting the same value twice is a no-op
    pub async fn set(&self, channel: &str, key: &str, id: ItemId) {
        self.map.write().await.set(channel, key, id);
    }

    /// Register a query for a channel without changing its cursor
    pub async fn touch(&self, channel: &str, key: &str) {
        self.map.write().await.touch(channel, key);
    }

    /// Copy of the current in-memory document
    pub async fn snapshot(&self) -> CursorMap {
        self.map.read().await.clone()
    }

    /// Rewrite the persisted document from the current in-memory map
    pub async fn flush(&self) -> Result<()> {
        let _guard = self.flush_lock.lock().await;
        let snapshot = self.map.read().await.clone();
        self.backend.save(&snapshot).await?;
        debug!("Flushed cursors for {} channel(s)", snapshot.len());
        Ok(())
    }

    /// Flush every `interval` until the returned sender is dropped or set
    ///
    /// Each tick's failure is logged; the loop keeps running.
    pub fn spawn_periodic_flush(&self, interval: Duration) -> (watch::Sender<bool>, JoinHandle<()>) {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let store = self.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = store.flush().await {
                            error!("Periodic cursor flush failed: {e}");
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            info!("Stopping periodic cursor flush");
                            break;
                        }
                    }
                }
            }
        });

        (stop_tx, handle)
    }
}
