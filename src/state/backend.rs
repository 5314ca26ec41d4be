//! Persistence backends for the cursor document
//!
//! A backend loads and saves the whole document at once; there are no
//! incremental writes.

use super::types::CursorMap;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Storage for the flushed cursor document
#[async_trait]
pub trait CursorBackend: Send + Sync + std::fmt::Debug {
    /// Load the stored document, or `None` if nothing was stored yet
    ///
    /// Malformed content is an error, never an empty map.
    async fn load(&self) -> Result<Option<CursorMap>>;

    /// Replace the stored document
    async fn save(&self, map: &CursorMap) -> Result<()>;
}

// ============================================================================
// File Backend
// ============================================================================

/// JSON file on disk, rewritten through a temp file and rename
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Create a backend for the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CursorBackend for FileBackend {
    async fn load(&self) -> Result<Option<CursorMap>> {
        let exists = tokio::fs::try_exists(&self.path).await.map_err(|e| {
            Error::state(format!(
                "Failed to check state file {}: {e}",
                self.path.display()
            ))
        })?;
        if !exists {
            debug!("No cursor file at {}, starting empty", self.path.display());
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;

        let map = serde_json::from_str(&contents).map_err(|e| {
            Error::state(format!(
                "Failed to parse state file {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Some(map))
    }

    async fn save(&self, map: &CursorMap) -> Result<()> {
        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| Error::state(format!("Failed to create state dir: {e}")))?;
            }
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        Ok(())
    }
}

// ============================================================================
// Memory Backend
// ============================================================================

/// Keeps the last saved document as JSON in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saved: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-loaded with a JSON document
    pub fn from_json(json: impl Into<String>) -> Self {
        Self {
            saved: Mutex::new(Some(json.into())),
        }
    }

    /// The last saved document, if any
    pub async fn saved_json(&self) -> Option<String> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl CursorBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<CursorMap>> {
        let saved = self.saved.lock().await;
        saved
            .as_deref()
            .map(|json| {
                serde_json::from_str(json)
                    .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))
            })
            .transpose()
    }

    async fn save(&self, map: &CursorMap) -> Result<()> {
        let json = serde_json::to_string(map)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;
        *self.saved.lock().await = Some(json);
        Ok(())
    }
}
