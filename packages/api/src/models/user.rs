//! # Authentication models
//!
//! ## [`AuthenticateRequest`] / [`AuthResponse`]
//!
//! `POST /v1.0/users/authenticate` takes `{ logon, password, instanceUri }` and
//! answers `{ token, fechaExpiracion, userId }`. [`AuthResponse::to_session`]
//! turns the answer into the [`Session`] that is persisted.
//!
//! ## [`UserProfile`] / [`LoggedUser`]
//!
//! `GET /v1.0/users/{userId}` returns the profile in English field names. The
//! login page combines it with the typed logon into a [`LoggedUser`], filling
//! the gaps with `"N/A"` (rank) and `"Usuario"` (surname).

use serde::{Deserialize, Serialize};
use store::{RawId, Session};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest {
    pub logon: String,
    pub password: String,
    pub instance_uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub fecha_expiracion: String,
    pub user_id: RawId,
}

impl AuthResponse {
    pub fn to_session(&self) -> Session {
        Session {
            token: self.token.clone(),
            expires_at: self.fecha_expiracion.clone(),
            user_id: self.user_id.to_string(),
        }
    }
}

/// Profile of the authenticated operator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub rank: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub organization: Option<String>,
    pub level: Option<String>,
    pub unit: Option<String>,
}

/// What the welcome screen shows after a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedUser {
    pub logon: String,
    pub jerarquia: String,
    pub apellido: String,
    pub nombre: String,
    pub organizacion: String,
    pub nivel: String,
    pub destino: String,
    pub user_id: String,
}

impl LoggedUser {
    pub fn new(logon: &str, auth: &AuthResponse, profile: UserProfile) -> Self {
        fn or(value: Option<String>, fallback: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        }

        Self {
            logon: logon.to_string(),
            jerarquia: or(profile.rank, "N/A"),
            apellido: or(profile.last_name, "Usuario"),
            nombre: or(profile.first_name, ""),
            organizacion: or(profile.organization, ""),
            nivel: or(profile.level, ""),
            destino: or(profile.unit, ""),
            user_id: auth.user_id.to_string(),
        }
    }

    /// `rank lastName firstName`, without dangling spaces.
    pub fn greeting_name(&self) -> String {
        [&self.jerarquia, &self.apellido, &self.nombre]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
