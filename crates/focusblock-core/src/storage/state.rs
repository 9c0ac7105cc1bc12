//! Active-session snapshot persistence.
//!
//! Hosts whose runtime can be torn down mid-block (a popup closing, a CLI
//! exiting between commands) save the running session here and restore it
//! on the next launch. One snapshot at a time; ending the block clears it.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::block::BlockSession;
use crate::error::{Result, StateError};

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store under the standard data directory.
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: data_dir()?.join("session.json"),
        })
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if any.
    ///
    /// A missing or unreadable snapshot loads as `None` -- the host starts
    /// fresh rather than failing.
    pub fn load(&self) -> Option<BlockSession> {
        let json = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn save(&self, session: &BlockSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        std::fs::write(&self.path, json).map_err(|e| StateError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Remove the snapshot. Removing a snapshot that never existed is fine.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateError::ClearFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockSession, BlockStatus, CheckInSpec};

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::with_path(dir.path().join("session.json"))
    }

    #[test]
    fn load_without_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_none());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (mut session, _) =
            BlockSession::start(20.0, &[CheckInSpec::RepeatEvery(5.0)], 1_000);
        session.pause(61_000);
        store.save(&session).unwrap();

        let restored = store.load().expect("snapshot should load");
        assert_eq!(restored.id(), session.id());
        assert_eq!(restored.status(), BlockStatus::Paused);
        assert_eq!(restored.total_ms(), session.total_ms());
    }

    #[test]
    fn corrupt_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_removes_snapshot_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let (session, _) = BlockSession::start(20.0, &[], 0);
        store.save(&session).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing again is not an error.
        store.clear().unwrap();
    }
}
