//! # API crate: REST clients for the MINIDOC console
//!
//! Everything the frontend needs to talk to its two backends: the MINIDOC API
//! (user records and lookup tables) and the JWT authentication API.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `reqwest` wrapper: base URL, bearer token, error normalization, 401 handling |
//! | [`error`] | [`ApiError`] and the ProblemDetails body parser |
//! | [`auth`] | Login, profile lookup, logout, login error messages |
//! | [`usuarios`] | CRUD over `/UsuarioMinidoc` with display-ready [`ServiceError`]s |
//! | [`lookups`] | Concurrent load of the seven reference tables into a [`store::LookupCache`] |
//! | [`models`] | Authentication request/response and profile models |
//!
//! [`Backend`] bundles the three services for the frontend.

pub mod auth;
pub mod client;
pub mod error;
pub mod lookups;
pub mod models;
pub mod usuarios;

pub use auth::{login_error_message, AuthService};
pub use client::ApiClient;
pub use error::{ApiError, ProblemDetails};
pub use lookups::{fetch_lookups, LookupLoad};
pub use models::{AuthResponse, LoggedUser, UserProfile};
pub use usuarios::{ServiceError, UsuarioService};

use store::{ConsoleConfig, SessionStore};

/// Both API clients and the services built on them, sharing one session.
#[derive(Clone, Debug)]
pub struct Backend {
    pub auth: AuthService,
    pub usuarios: UsuarioService,
    pub minidoc: ApiClient,
}

impl Backend {
    /// `on_unauthorized` runs after the MINIDOC API rejected the stored token.
    pub fn new(
        config: &ConsoleConfig,
        session: SessionStore,
        on_unauthorized: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, ApiError> {
        let minidoc = ApiClient::minidoc(&config.api, session.clone())?
            .with_unauthorized_hook(on_unauthorized);
        let auth_client = ApiClient::auth(&config.api, session)?;
        Ok(Self {
            auth: AuthService::new(auth_client, config.api.auth_instance_uri.clone()),
            usuarios: UsuarioService::new(minidoc.clone()),
            minidoc,
        })
    }

    pub async fn lookups(&self) -> LookupLoad {
        fetch_lookups(&self.minidoc).await
    }
}
