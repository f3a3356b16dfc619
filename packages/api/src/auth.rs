//! # Authentication service
//!
//! Login against the JWT API, profile lookup and session teardown. A
//! successful [`AuthService::login`] persists the token, its expiry and the
//! user id through the client's [`store::SessionStore`].

use store::SessionStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, AuthenticateRequest, UserProfile};

const AUTHENTICATE_PATH: &str = "/v1.0/users/authenticate";
const DEFAULT_LOGIN_ERROR: &str = "Error de autenticación. Por favor, intente nuevamente.";

#[derive(Clone, Debug)]
pub struct AuthService {
    client: ApiClient,
    instance_uri: String,
}

impl AuthService {
    pub fn new(client: ApiClient, instance_uri: impl Into<String>) -> Self {
        Self {
            client,
            instance_uri: instance_uri.into(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    pub async fn login(&self, logon: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = AuthenticateRequest {
            logon: logon.to_string(),
            password: password.to_string(),
            instance_uri: self.instance_uri.clone(),
        };
        let response: AuthResponse = self
            .client
            .post(AUTHENTICATE_PATH, &request)
            .await
            .inspect_err(|e| tracing::error!("❌ Login failed for {logon}: {e}"))?;

        self.session().save(&response.to_session())?;
        tracing::info!(
            user_id = %response.user_id,
            expires_at = %response.fecha_expiracion,
            "✅ Login successful"
        );
        Ok(response)
    }

    pub async fn user_data(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let profile: Option<UserProfile> = self
            .client
            .get(&format!("/v1.0/users/{user_id}"))
            .await
            .inspect_err(|e| tracing::error!("❌ Could not load profile {user_id}: {e}"))?;
        Ok(profile.unwrap_or_default())
    }

    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("✅ Session closed");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}

/// The message the login form shows for a failed login.
pub fn login_error_message(error: &ApiError) -> String {
    if let Some(problem) = error.problem() {
        // An `errors` object wins even when it holds no usable message
        if problem.has_errors_map {
            return problem
                .errors
                .first()
                .and_then(|(_, messages)| messages.first())
                .cloned()
                .unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string());
        } else if let Some(first) = problem.first_message() {
            return first.to_string();
        }
    }

    match error {
        ApiError::Timeout => "Tiempo de espera agotado. Verifique su conexión.",
        ApiError::Network(_) => {
            "No se pudo conectar con el servidor. Verifique su conexión a internet."
        }
        ApiError::Status { status: 500, .. } => "Error del servidor. Por favor, intente más tarde.",
        ApiError::Status { status: 401, .. } => {
            "Credenciales inválidas. Verifique su usuario y contraseña."
        }
        _ => DEFAULT_LOGIN_ERROR,
    }
    .to_string()
}
