//! # Console configuration: `minidoc.toml`
//!
//! Where the two backends live and which storage keys hold the session.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! minidoc_url = "https://localhost:7043/api"
//! auth_url = "http://localhost:5278/api"
//! timeout_ms = 30000
//! auth_instance_uri = "/api/v1.0/users/authenticate"
//!
//! [session]
//! token_key = "authToken"
//! expiry_key = "authTokenExpiry"
//! user_id_key = "userId"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ConsoleConfig`] | Top-level config. TOML parsing, file loading, compile-time env overrides. |
//! | [`ApiConfig`] | Base URLs of the MINIDOC and authentication APIs, request timeout. |
//! | [`SessionConfig`] | Names of the three persistent storage keys. |
//!
//! Every struct derives `Default` with the production defaults, so a missing
//! or empty file is equivalent to the default configuration. The browser has
//! no runtime environment: [`ConsoleConfig::from_env`] reads `MINIDOC_API_URL`
//! and `MINIDOC_AUTH_API_URL` at compile time. Native builds first read
//! [`ConsoleConfig::from_file`] and apply the same overrides on top.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MINIDOC_URL: &str = "https://localhost:7043/api";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:5278/api";

/// Top-level configuration stored in `minidoc.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_minidoc_url")]
    pub minidoc_url: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Request timeout in milliseconds. Only enforced on native targets.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Value sent as `instanceUri` in the authenticate request body.
    #[serde(default = "default_instance_uri")]
    pub auth_instance_uri: String,
}

fn default_minidoc_url() -> String {
    DEFAULT_MINIDOC_URL.to_string()
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_instance_uri() -> String {
    "/api/v1.0/users/authenticate".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            minidoc_url: default_minidoc_url(),
            auth_url: default_auth_url(),
            timeout_ms: default_timeout_ms(),
            auth_instance_uri: default_instance_uri(),
        }
    }
}

/// Persistent storage key names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_expiry_key")]
    pub expiry_key: String,
    #[serde(default = "default_user_id_key")]
    pub user_id_key: String,
}

fn default_token_key() -> String {
    "authToken".to_string()
}

fn default_expiry_key() -> String {
    "authTokenExpiry".to_string()
}

fn default_user_id_key() -> String {
    "userId".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            expiry_key: default_expiry_key(),
            user_id_key: default_user_id_key(),
        }
    }
}

impl ConsoleConfig {
    /// Defaults with the compile-time `MINIDOC_API_URL` / `MINIDOC_AUTH_API_URL` overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(option_env!("MINIDOC_API_URL"), option_env!("MINIDOC_AUTH_API_URL"))
    }

    /// Replace the base URLs when an override is present and non-empty.
    pub fn with_overrides(mut self, minidoc_url: Option<&str>, auth_url: Option<&str>) -> Self {
        if let Some(url) = minidoc_url.filter(|u| !u.trim().is_empty()) {
            self.api.minidoc_url = url.trim().to_string();
        }
        if let Some(url) = auth_url.filter(|u| !u.trim().is_empty()) {
            self.api.auth_url = url.trim().to_string();
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "minidoc.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Read a config file. A missing file is the default configuration; an
    /// unreadable or malformed one is logged and also falls back to defaults.
    pub fn from_file(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        Self::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!("Invalid {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// [`from_file`](Self::from_file) followed by the compile-time overrides.
    pub fn from_file_and_env(path: &Path) -> Self {
        Self::from_file(path).with_overrides(option_env!("MINIDOC_API_URL"), option_env!("MINIDOC_AUTH_API_URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ConsoleConfig::from_toml("").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api.minidoc_url, "https://localhost:7043/api");
        assert_eq!(config.api.auth_url, "http://localhost:5278/api");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert_eq!(config.session.token_key, "authToken");
        assert_eq!(config.session.expiry_key, "authTokenExpiry");
        assert_eq!(config.session.user_id_key, "userId");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ConsoleConfig::from_toml(
            r#"
            [api]
            minidoc_url = "https://minidoc.example/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.minidoc_url, "https://minidoc.example/api");
        assert_eq!(config.api.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let config = ConsoleConfig::default().with_overrides(Some("  "), Some("http://auth:1/api"));
        assert_eq!(config.api.minidoc_url, DEFAULT_MINIDOC_URL);
        assert_eq!(config.api.auth_url, "http://auth:1/api");
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("minidoc_config_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_from_file_reads_settings() {
        let dir = temp_dir("reads");
        let path = dir.join(ConsoleConfig::filename());
        std::fs::write(
            &path,
            "[api]\nauth_url = \"http://auth.example/api\"\ntimeout_ms = 5000\n\n[session]\ntoken_key = \"jwt\"\n",
        )
        .unwrap();

        let config = ConsoleConfig::from_file(&path);
        assert_eq!(config.api.auth_url, "http://auth.example/api");
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.api.minidoc_url, DEFAULT_MINIDOC_URL);
        assert_eq!(config.session.token_key, "jwt");
        assert_eq!(config.session.user_id_key, "userId");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_from_file_missing_or_malformed_is_default() {
        let dir = temp_dir("fallback");
        let path = dir.join(ConsoleConfig::filename());
        assert_eq!(ConsoleConfig::from_file(&path), ConsoleConfig::default());

        std::fs::write(&path, "[api\nminidoc_url = ").unwrap();
        assert_eq!(ConsoleConfig::from_file(&path), ConsoleConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
