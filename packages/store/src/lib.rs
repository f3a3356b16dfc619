pub mod config;
pub mod listing;
pub mod lookups;
pub mod models;
pub mod session;
pub mod storage;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ApiConfig, ConsoleConfig, SessionConfig};
pub use listing::{SortConfig, SortDirection, SortKey};
pub use lookups::{LookupCache, LookupEntry, LookupKind};
pub use models::{CreateUsuarioRequest, RawId, UpdateUsuarioRequest, Usuario};
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStore, StorageError};
