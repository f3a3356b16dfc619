//! # Usuario service
//!
//! CRUD over `/UsuarioMinidoc`. The backend creates the account in the
//! authentication API itself, so the console only ever talks to MINIDOC here.
//!
//! | Operation | Request | Fallback message |
//! |-----------|---------|------------------|
//! | [`UsuarioService::get_all`] | `GET /UsuarioMinidoc` | `Error al cargar usuarios` |
//! | [`UsuarioService::get_by_id`] | `GET /UsuarioMinidoc/{id}` | `Error al cargar usuario` |
//! | [`UsuarioService::create`] | `POST /UsuarioMinidoc` | `Error al crear usuario` |
//! | [`UsuarioService::update`] | `PUT /UsuarioMinidoc/{id}` | `Error al actualizar usuario` |
//! | [`UsuarioService::delete`] | `DELETE /UsuarioMinidoc/{id}` | `Error al eliminar usuario` |
//!
//! Failures become a [`ServiceError`]: the body's `error` field (or the first
//! ProblemDetails message) when present, the fallback otherwise, plus the
//! per-field validation errors for the form.

use serde_json::Value;
use store::{CreateUsuarioRequest, RawId, UpdateUsuarioRequest, Usuario};
use thiserror::Error;

use crate::client::ApiClient;
use crate::error::ApiError;

const USUARIOS_PATH: &str = "/UsuarioMinidoc";

/// A failed usuario operation, ready to display.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub field_errors: Vec<(String, Vec<String>)>,
    pub status: Option<u16>,
}

impl ServiceError {
    pub fn from_api(error: &ApiError, fallback: &str) -> Self {
        Self {
            message: error.user_message(fallback),
            field_errors: error
                .problem()
                .map(|p| p.errors.clone())
                .unwrap_or_default(),
            status: error.status(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct UsuarioService {
    client: ApiClient,
}

impl UsuarioService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Usuario>, ServiceError> {
        let usuarios: Option<Vec<Usuario>> = self
            .client
            .get(USUARIOS_PATH)
            .await
            .map_err(|e| fail(&e, "Error al obtener usuarios", "Error al cargar usuarios"))?;
        let usuarios = usuarios.unwrap_or_default();
        tracing::info!("Loaded {} usuarios", usuarios.len());
        Ok(usuarios)
    }

    pub async fn get_by_id(&self, id: &RawId) -> Result<Usuario, ServiceError> {
        let usuario: Option<Usuario> = self
            .client
            .get(&item_path(id))
            .await
            .map_err(|e| fail(&e, "Error al obtener usuario", "Error al cargar usuario"))?;
        usuario.ok_or_else(|| ServiceError {
            message: "Error al cargar usuario".to_string(),
            field_errors: Vec::new(),
            status: None,
        })
    }

    /// Returns whatever the backend answered with (the created record, usually).
    pub async fn create(&self, request: &CreateUsuarioRequest) -> Result<Value, ServiceError> {
        let created = self
            .client
            .post(USUARIOS_PATH, request)
            .await
            .map_err(|e| fail(&e, "Error al crear usuario", "Error al crear usuario"))?;
        tracing::info!(logon = %request.logon, "✅ Usuario created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &RawId,
        request: &UpdateUsuarioRequest,
    ) -> Result<Value, ServiceError> {
        let updated = self
            .client
            .put(&item_path(id), request)
            .await
            .map_err(|e| fail(&e, "Error al actualizar usuario", "Error al actualizar usuario"))?;
        tracing::info!(%id, "✅ Usuario updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &RawId) -> Result<(), ServiceError> {
        self.client
            .delete(&item_path(id))
            .await
            .map_err(|e| fail(&e, "Error al eliminar usuario", "Error al eliminar usuario"))?;
        tracing::info!(%id, "✅ Usuario deleted");
        Ok(())
    }
}

fn item_path(id: &RawId) -> String {
    format!("{USUARIOS_PATH}/{id}")
}

fn fail(error: &ApiError, context: &str, fallback: &str) -> ServiceError {
    tracing::error!("❌ {context}: {error}");
    ServiceError::from_api(error, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProblemDetails;

    #[test]
    fn test_service_error_keeps_field_errors() {
        let api = ApiError::Status {
            status: 400,
            problem: ProblemDetails::parse(
                r#"{"title": "Validation", "errors": {"Logon": ["Ya existe"]}}"#,
            ),
        };
        let err = ServiceError::from_api(&api, "Error al crear usuario");
        assert_eq!(err.message, "Ya existe");
        assert_eq!(err.field_errors, vec![("Logon".to_string(), vec!["Ya existe".to_string()])]);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "Ya existe");
    }

    #[test]
    fn test_service_error_fallback() {
        let err = ServiceError::from_api(&ApiError::Timeout, "Error al eliminar usuario");
        assert_eq!(err.message, "Error al eliminar usuario");
        assert!(err.field_errors.is_empty());
        assert_eq!(err.status, None);
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path(&RawId::from(12)), "/UsuarioMinidoc/12");
        assert_eq!(item_path(&RawId::from("abc")), "/UsuarioMinidoc/abc");
    }
}
