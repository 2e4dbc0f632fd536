pub mod config;
pub mod error;
pub mod models;
pub mod repo;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

pub use config::{ClientConfig, Locale};
pub use error::StoreError;
pub use models::{Note, Session};
pub use repo::{KeyValueStore, SessionRepository};
