//! Board persistence on top of a [`KeyValueStore`].
//!
//! Persistence is best-effort: failures are logged and never reach the edit
//! path, and anything unreadable loads as an empty board.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::board::{Board, BoardState};
use crate::config::EditorConfig;
use std::sync::Arc;

/// Write the board state under `key`. Returns false (after logging) on failure.
pub async fn save_board<S: KeyValueStore + ?Sized>(storage: &S, key: &str, board: &Board) -> bool {
    match try_save(storage, key, board.state()).await {
        Ok(()) => {
            log::debug!("Saved board to '{key}'");
            true
        }
        Err(e) => {
            log::warn!("Failed to save board to '{key}': {e}");
            false
        }
    }
}

async fn try_save<S: KeyValueStore + ?Sized>(storage: &S, key: &str, state: &BoardState) -> StorageResult<()> {
    let json = state
        .to_json()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.set(key, &json).await
}

/// Read the board under `key` into a new board with empty history.
///
/// A missing key, a read error or an unparsable blob all yield an empty board.
pub async fn load_board<S: KeyValueStore + ?Sized>(storage: &S, key: &str, config: EditorConfig) -> Board {
    let state = match storage.get(key).await {
        Ok(Some(json)) => BoardState::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable board under '{key}': {e}");
            BoardState::default()
        }),
        Ok(None) => {
            log::debug!("No saved board under '{key}'");
            BoardState::default()
        }
        Err(e) => {
            log::warn!("Failed to load board from '{key}': {e}");
            BoardState::default()
        }
    };
    Board::with_state(config, state)
}

/// Tracks which board version was last persisted under one key.
pub struct BoardStore<S: KeyValueStore> {
    storage: Arc<S>,
    key: String,
    saved_version: Option<u64>,
}

impl<S: KeyValueStore> BoardStore<S> {
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            saved_version: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// True if `board` changed since the last successful save or load.
    pub fn is_dirty(&self, board: &Board) -> bool {
        self.saved_version != Some(board.version())
    }

    /// Save if the board changed. Returns true if a save was performed.
    pub async fn maybe_save(&mut self, board: &Board) -> bool {
        if !self.is_dirty(board) {
            return false;
        }
        self.save(board).await
    }

    /// Save now. Failures are logged and leave the store dirty.
    pub async fn save(&mut self, board: &Board) -> bool {
        let saved = save_board(self.storage.as_ref(), &self.key, board).await;
        if saved {
            self.saved_version = Some(board.version());
        }
        saved
    }

    /// Load the saved board, or an empty one.
    pub async fn load(&mut self, config: EditorConfig) -> Board {
        let board = load_board(self.storage.as_ref(), &self.key, config).await;
        self.saved_version = Some(board.version());
        board
    }

    /// Delete the saved board.
    pub async fn clear(&mut self) -> StorageResult<()> {
        self.saved_version = None;
        self.storage.remove(&self.key).await
    }
}
