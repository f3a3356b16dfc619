//! # HTTP client
//!
//! [`ApiClient`] wraps a `reqwest::Client` bound to one backend base URL. Every
//! request carries `Content-Type: application/json` and, when a session token
//! is stored, `Authorization: Bearer <token>`.
//!
//! Two clients exist at runtime:
//!
//! | Constructor | Base URL | On HTTP 401 |
//! |-------------|----------|-------------|
//! | [`ApiClient::minidoc`] | `api.minidoc_url` | clears the session, runs the unauthorized hook |
//! | [`ApiClient::auth`] | `api.auth_url` | returns the error (bad credentials) |
//!
//! The unauthorized hook is how the frontend forces a redirect to `/login`.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{ApiConfig, SessionStore};

use crate::error::{ApiError, ProblemDetails};

/// Callback run after a 401 cleared the session.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    name: &'static str,
    session: SessionStore,
    clears_session_on_401: bool,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client for the MINIDOC API.
    pub fn minidoc(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        Self::build("MINIDOC", &config.minidoc_url, config.timeout_ms, session, true)
    }

    /// Client for the authentication API.
    pub fn auth(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        Self::build("AUTH", &config.auth_url, config.timeout_ms, session, false)
    }

    fn build(
        name: &'static str,
        base_url: &str,
        timeout_ms: u64,
        session: SessionStore,
        clears_session_on_401: bool,
    ) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        // wasm requests are bounded by the browser
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_millis(timeout_ms));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_ms;

        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            name,
            session,
            clears_session_on_401,
            on_unauthorized: None,
        })
    }

    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        Self::decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        Self::decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("🚀 {} {} {}", self.name, method, url);
        let builder = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::error!("❌ {} {}: {}", self.name, path, err);
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("✅ {} {} {}", self.name, status.as_u16(), path);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let problem = ProblemDetails::parse(&body);
        tracing::error!(
            status = status.as_u16(),
            "❌ {} {}: {}",
            self.name,
            path,
            problem.first_message().unwrap_or("no detail")
        );

        match status.as_u16() {
            401 if self.clears_session_on_401 => {
                tracing::warn!("🔒 {} rejected the token, clearing session", self.name);
                self.session.clear();
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            403 => tracing::warn!("🚫 {} denied access to {}", self.name, path),
            _ => {}
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            problem,
        })
    }

    /// Decode a JSON body. An empty body decodes as JSON `null`.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = ApiConfig {
            minidoc_url: "http://localhost:7043/api/".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::minidoc(&config, SessionStore::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:7043/api");
        assert_eq!(client.url("/Jerarquia"), "http://localhost:7043/api/Jerarquia");
        assert_eq!(client.url("Destino"), "http://localhost:7043/api/Destino");
    }

    #[test]
    fn test_auth_client_uses_auth_url() {
        let config = ApiConfig::default();
        let client = ApiClient::auth(&config, SessionStore::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5278/api");
        assert!(!client.clears_session_on_401);
    }
}
