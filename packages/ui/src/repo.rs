//! Shared session repository constructor.
//!
//! Returns a [`store::SessionRepository`] backed by a [`store::FileStore`]
//! rooted at the configured storage directory, or at
//! `<data_dir>/notes-client/` when the config leaves it empty.

use std::path::PathBuf;

use store::{ClientConfig, FileStore, SessionRepository};

/// Directory name used under the platform data directory.
pub const APP_DIR: &str = "notes-client";

/// Resolve the directory that holds the persisted session.
pub fn data_dir(config: &ClientConfig) -> PathBuf {
    let configured = config.storage.dir.trim();
    if !configured.is_empty() {
        return PathBuf::from(configured);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Create the file-backed store the session lives in.
pub fn make_store(config: &ClientConfig) -> FileStore {
    FileStore::new(data_dir(config))
}

/// Create the session repository for this config.
pub fn make_session_repo(config: &ClientConfig) -> SessionRepository<FileStore> {
    SessionRepository::new(make_store(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_dir_wins() {
        let mut config = ClientConfig::default();
        config.storage.dir = "/tmp/notes-session".to_string();
        assert_eq!(data_dir(&config), PathBuf::from("/tmp/notes-session"));
    }

    #[test]
    fn test_default_dir_is_namespaced() {
        let config = ClientConfig::default();
        assert!(data_dir(&config).ends_with(APP_DIR));
    }
}
