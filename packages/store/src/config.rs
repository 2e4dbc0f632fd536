//! # Client configuration — `notes-client.toml`
//!
//! Defines the TOML configuration file read by the terminal client at startup
//! (filename: [`ClientConfig::filename`] = `"notes-client.toml"`). It tells the
//! client where the notes service lives, where to persist the session, and which
//! language to use for user-visible messages.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//!
//! [storage]
//! dir = ""          # empty = platform data directory
//!
//! [ui]
//! locale = "en"     # "en" or "es"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config. TOML (de)serialisation, file loading, environment overrides. |
//! | [`ApiConfig`] | Base URL of the notes service. Defaults to **`http://localhost:3000`**. |
//! | [`StorageConfig`] | Directory for the persisted session. Empty means the platform data dir. |
//! | [`UiConfig`] | Message [`Locale`]. Defaults to English. |
//!
//! All structs derive `Default` so that a missing or empty config file is
//! equivalent to the default configuration.
//!
//! ## Environment overrides
//!
//! [`ClientConfig::with_env_overrides`] applies the variables listed in
//! [`env_vars`] on top of whatever the file said.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Environment variable names.
pub mod env_vars {
    pub const API_URL: &str = "NOTES_API_URL";
    pub const DATA_DIR: &str = "NOTES_DATA_DIR";
    pub const LOCALE: &str = "NOTES_LOCALE";
}

/// Top-level configuration stored in `notes-client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote notes service settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Local persistence settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted session.
    /// Empty string means the platform data directory.
    #[serde(default)]
    pub dir: String,
}

/// Presentation settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
}

/// Language of user-visible messages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a locale tag such as `"es"` or `"es-ES"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag.split(['-', '_']).next()?.trim().to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "notes-client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Self::from_toml(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Write to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| StoreError::io(path, e))
    }

    /// Apply the process environment on top of this config.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored,
    /// as are locale tags that are not recognised.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());

        if let Some(url) = get(env_vars::API_URL) {
            self.api.base_url = url;
        }
        if let Some(dir) = get(env_vars::DATA_DIR) {
            self.storage.dir = dir;
        }
        if let Some(locale) = get(env_vars::LOCALE).and_then(|tag| Locale::from_tag(&tag)) {
            self.ui.locale = locale;
        }
        self
    }
}
