//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists each key as
//! a small text file. It is what keeps a session alive across restarts of the
//! terminal client.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── userId       # server-assigned identity
//! └── userName     # display name
//! ```
//!
//! ## Platform data directories
//!
//! The `ui` crate picks the base with [`dirs::data_dir()`] unless the config
//! overrides it:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/notes-client/` |
//! | Linux | `~/.local/share/notes-client/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\notes-client\` |
//!
//! [`dirs::data_dir()`]: https://docs.rs/dirs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::repo::KeyValueStore;

/// Filesystem-backed KeyValueStore.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base).map_err(|e| StoreError::io(&self.base, e))?;
        let path = self.key_path(key);
        std::fs::write(&path, value).map_err(|e| StoreError::io(path, e))
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}
