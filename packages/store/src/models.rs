//! # Domain models for MINIDOC user records
//!
//! The data structures exchanged with the MINIDOC API's `/UsuarioMinidoc`
//! endpoints. The API is not strict about field names or types, so these types
//! are lenient on the way in:
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`RawId`] | An id that arrives as a JSON number or a string. |
//! | [`Usuario`] | A user record as listed or fetched. Both `id`/`idUsuarioMinidoc` and `logon`/`userName` spellings are accepted; accessors pick the one present. |
//! | [`CreateUsuarioRequest`] | The denormalized PascalCase payload for `POST /UsuarioMinidoc`. |
//! | [`UpdateUsuarioRequest`] | The PascalCase payload for `PUT /UsuarioMinidoc/{id}` (no credentials). |

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier that may be sent as a number or as a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Zero and the empty string count as "no id".
    pub fn is_present(&self) -> bool {
        match self {
            RawId::Number(n) => *n != 0,
            RawId::Text(s) => !s.is_empty(),
        }
    }

    /// Integer value used to match lookup entries. Strings are read as a
    /// leading integer (`"12"`, `" 12"`, `"12abc"` all give 12).
    pub fn as_i64(&self) -> Option<i64> {
        if !self.is_present() {
            return None;
        }
        match self {
            RawId::Number(n) => Some(*n),
            RawId::Text(s) => parse_int_prefix(s),
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        RawId::Number(n)
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}

impl From<String> for RawId {
    fn from(s: String) -> Self {
        RawId::Text(s)
    }
}

/// Parse the leading integer of a string, skipping leading whitespace.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Rank object some endpoints embed in the user record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedJerarquia {
    pub nombre: Option<String>,
    pub iniciales: Option<String>,
}

/// Destination object some endpoints embed in the user record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedDestino {
    pub nombre: Option<String>,
}

/// A MINIDOC user record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usuario {
    pub id: Option<RawId>,
    pub id_usuario_minidoc: Option<RawId>,
    pub logon: Option<String>,
    pub user_name: Option<String>,
    pub matricula_revista: Option<RawId>,
    pub apellido: Option<String>,
    pub nombre: Option<String>,
    pub jerarquia_id: Option<RawId>,
    pub destino_id: Option<RawId>,
    pub nivel_id: Option<RawId>,
    pub alcance_id: Option<RawId>,
    pub id_cuerpo: Option<RawId>,
    pub id_escalafon: Option<RawId>,
    pub id_tipo_clasificacion: Option<RawId>,
    pub jerarquia: Option<EmbeddedJerarquia>,
    pub destino: Option<EmbeddedDestino>,
    pub confianza: Option<bool>,
    pub super_confianza: Option<bool>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn present_id(value: &Option<RawId>) -> Option<&RawId> {
    value.as_ref().filter(|id| id.is_present())
}

impl Usuario {
    /// Record key: `id`, falling back to `idUsuarioMinidoc`.
    pub fn key(&self) -> Option<&RawId> {
        present_id(&self.id).or_else(|| present_id(&self.id_usuario_minidoc))
    }

    /// Login name: `logon`, falling back to `userName`.
    pub fn logon_name(&self) -> Option<&str> {
        present(&self.logon).or_else(|| present(&self.user_name))
    }

    pub fn matricula(&self) -> Option<String> {
        present_id(&self.matricula_revista).map(|m| m.to_string())
    }

    pub fn apellido(&self) -> Option<&str> {
        present(&self.apellido)
    }

    pub fn nombre(&self) -> Option<&str> {
        present(&self.nombre)
    }

    /// `"Apellido, Nombre"` as shown in the detail header.
    pub fn full_name(&self) -> String {
        format!(
            "{}, {}",
            self.apellido().unwrap_or_default(),
            self.nombre().unwrap_or_default()
        )
    }

    /// `"Nombre Apellido"` as used in confirmation prompts.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.nombre().unwrap_or_default(),
            self.apellido().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn has_confianza(&self) -> bool {
        self.confianza.unwrap_or(false)
    }

    pub fn has_super_confianza(&self) -> bool {
        self.super_confianza.unwrap_or(false)
    }
}

/// Payload for `POST /UsuarioMinidoc`. The backend creates the account in the
/// authentication service and then stores the personal data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateUsuarioRequest {
    pub logon: String,
    pub password: String,
    pub password_confirmation: String,
    pub matricula_revista: String,
    pub apellido: String,
    pub nombre: String,
    pub jerarquia_id: i64,
    pub destino_id: Option<i64>,
    pub nivel_id: i64,
    pub id_tipo_clasificacion: i64,
    pub id_escalafon: Option<i64>,
    pub id_cuerpo: Option<i64>,
    pub confianza: bool,
    pub super_confianza: bool,
}

/// Payload for `PUT /UsuarioMinidoc/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateUsuarioRequest {
    pub matricula_revista: String,
    pub apellido: String,
    pub nombre: String,
    pub jerarquia_id: i64,
    pub destino_id: Option<i64>,
    pub nivel_id: i64,
    pub id_tipo_clasificacion: i64,
    pub id_escalafon: Option<i64>,
    pub id_cuerpo: Option<i64>,
    pub confianza: bool,
    pub super_confianza: bool,
}
