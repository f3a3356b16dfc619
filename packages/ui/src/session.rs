//! Shared session and backend constructors for all platforms.
//!
//! Returns a [`store::SessionStore`] backed by the appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: one file per key under `<data_dir>/minidoc/session/` via [`store::FileStore`]
//!
//! [`load_config`] reads `<config_dir>/minidoc/minidoc.toml` on native builds;
//! the browser only has the compile-time overrides.

use std::sync::Arc;

use store::{ConsoleConfig, KeyValueStore, SessionStore};

/// The console configuration for this platform.
pub fn load_config() -> ConsoleConfig {
    #[cfg(target_arch = "wasm32")]
    {
        ConsoleConfig::from_env()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = config_path();
        tracing::debug!("Loading {}", path.display());
        ConsoleConfig::from_file_and_env(&path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("minidoc")
        .join(ConsoleConfig::filename())
}

/// Create a platform-appropriate session store using the key names of `config`.
pub fn make_session_store(config: &ConsoleConfig) -> SessionStore {
    SessionStore::new(make_backend_store(), config.session.clone())
}

fn make_backend_store() -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorageStore)
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("minidoc")
            .join("session");
        Arc::new(store::FileStore::new(base))
    }
}

/// Build both API clients over the platform session store. A 401 from the
/// MINIDOC API sends the browser back to `/login`.
pub fn make_backend(config: &ConsoleConfig) -> Result<api::Backend, api::ApiError> {
    api::Backend::new(config, make_session_store(config), crate::navigation::redirect_to_login)
}
