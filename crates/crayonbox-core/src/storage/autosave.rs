//! Periodic saving of the canvas.

use super::{SAVED_CANVAS_KEY, Storage, StorageResult, load_canvas, save_canvas};
use crate::canvas::SavedCanvas;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default auto-save interval in seconds.
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;

/// Writes the canvas to storage when it has unsaved changes and the
/// interval has passed since the last write.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    interval: Duration,
    last_save: Option<Instant>,
    dirty: bool,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
            last_save: None,
            dirty: false,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Note that the canvas changed since the last save.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn should_save(&self) -> bool {
        if !self.dirty {
            return false;
        }
        match self.last_save {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Save if dirty and due. Returns whether a write happened.
    pub async fn maybe_save(&mut self, saved: &SavedCanvas) -> StorageResult<bool> {
        if !self.should_save() {
            return Ok(false);
        }
        self.save(saved).await?;
        Ok(true)
    }

    /// Save now, regardless of the dirty flag.
    pub async fn save(&mut self, saved: &SavedCanvas) -> StorageResult<()> {
        save_canvas(self.storage.as_ref(), saved).await?;
        self.last_save = Some(Instant::now());
        self.dirty = false;
        log::info!("Auto-saved canvas under {SAVED_CANVAS_KEY}");
        Ok(())
    }

    /// Load the saved canvas; empty when nothing usable is stored.
    pub async fn load(&mut self) -> SavedCanvas {
        let saved = load_canvas(self.storage.as_ref()).await;
        self.dirty = false;
        self.last_save = Some(Instant::now());
        saved
    }

    /// Forget the saved canvas.
    pub async fn discard(&mut self) -> StorageResult<()> {
        self.storage.delete(SAVED_CANVAS_KEY).await?;
        self.dirty = false;
        Ok(())
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}
