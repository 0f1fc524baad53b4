//! Key-value persistence for saved canvases.

mod autosave;
mod file;
mod memory;

pub use autosave::{AutoSaveManager, DEFAULT_AUTOSAVE_INTERVAL_SECS};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::canvas::SavedCanvas;
use crate::stroke::Stroke;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Slot holding the one persisted canvas.
pub const SAVED_CANVAS_KEY: &str = "saved_canvas_paths";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A string store addressed by key.
///
/// Writes replace the whole value stored under a key.
pub trait Storage: Send + Sync {
    fn save(&self, key: &str, value: &str) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<String>>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Persist a canvas, overwriting whatever was saved before.
pub async fn save_canvas<S: Storage + ?Sized>(
    storage: &S,
    saved: &SavedCanvas,
) -> StorageResult<()> {
    let json = serde_json::to_string(saved)?;
    storage.save(SAVED_CANVAS_KEY, &json).await?;
    log::debug!("Saved canvas with {} strokes", saved.paths.len());
    Ok(())
}

/// Load the persisted canvas.
///
/// A missing or unreadable slot yields an empty canvas; the cause is logged.
pub async fn load_canvas<S: Storage + ?Sized>(storage: &S) -> SavedCanvas {
    let json = match storage.load(SAVED_CANVAS_KEY).await {
        Ok(json) => json,
        Err(StorageError::NotFound(_)) => {
            log::debug!("No saved canvas");
            return SavedCanvas::default();
        }
        Err(e) => {
            log::warn!("Failed to load saved canvas: {e}");
            return SavedCanvas::default();
        }
    };
    parse_saved(&json).unwrap_or_else(|e| {
        log::warn!("Ignoring corrupt saved canvas: {e}");
        SavedCanvas::default()
    })
}

/// Accepts both the full form and a bare list of strokes.
fn parse_saved(json: &str) -> Result<SavedCanvas, serde_json::Error> {
    match serde_json::from_str::<SavedCanvas>(json) {
        Ok(saved) => Ok(saved),
        Err(e) => match serde_json::from_str::<Vec<Stroke>>(json) {
            Ok(paths) => Ok(SavedCanvas {
                paths,
                ..Default::default()
            }),
            Err(_) => Err(e),
        },
    }
}
