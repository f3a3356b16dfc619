//! # API errors
//!
//! Every HTTP call returns [`ApiError`] on failure. Non-success responses carry
//! the parsed body as [`ProblemDetails`], the ASP.NET Core error shape both
//! backends use:
//!
//! ```json
//! { "title": "One or more validation errors occurred.",
//!   "errors": { "Logon": ["El logon ya existe"], "Password": "Muy corta" } }
//! ```
//!
//! `errors` values may be a single string or a list; both normalize to a list,
//! and the field order of the response is preserved.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Parsed error body of a failed request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDetails {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub detail: Option<String>,
    #[serde(deserialize_with = "field_errors")]
    pub errors: Vec<(String, Vec<String>)>,
    /// The body carried an `errors` object, possibly empty.
    #[serde(skip)]
    pub has_errors_map: bool,
}

impl ProblemDetails {
    /// Parse a response body. Anything that is not a JSON object yields an empty value.
    pub fn parse(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::default();
        };
        let has_errors_map = value.get("errors").is_some_and(Value::is_object);
        match serde_json::from_value::<Self>(value) {
            Ok(problem) => Self {
                has_errors_map,
                ..problem
            },
            Err(_) => Self::default(),
        }
    }

    /// Every field message, in response order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors
            .iter()
            .flat_map(|(_, msgs)| msgs.iter().map(String::as_str))
            .collect()
    }

    /// First field message, else `title`, else `message`.
    pub fn first_message(&self) -> Option<&str> {
        fn non_empty(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.is_empty())
        }
        self.messages()
            .into_iter()
            .next()
            .or_else(|| non_empty(&self.title))
            .or_else(|| non_empty(&self.message))
    }

    /// The message a service call shows: the body's `error`, then [`first_message`](Self::first_message).
    pub fn service_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.first_message())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn field_errors<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldErrorsVisitor;

    impl<'de> Visitor<'de> for FieldErrorsVisitor {
        type Value = Vec<(String, Vec<String>)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of field names to messages")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::new();
            while let Some((field, value)) = map.next_entry::<String, Value>()? {
                let messages = match value {
                    Value::Array(items) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => s,
                            other => other.to_string(),
                        })
                        .collect(),
                    Value::String(s) => vec![s],
                    Value::Null => Vec::new(),
                    other => vec![other.to_string()],
                };
                out.push((field, messages));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(FieldErrorsVisitor)
}

/// Failure of a single API call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("could not reach the server: {0}")]
    Network(String),
    #[error("HTTP {status}: {}", .problem.first_message().unwrap_or("no detail"))]
    Status { status: u16, problem: ProblemDetails },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("client configuration error: {0}")]
    Client(String),
    #[error("could not persist the session: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn problem(&self) -> Option<&ProblemDetails> {
        match self {
            ApiError::Status { problem, .. } => Some(problem),
            _ => None,
        }
    }

    /// The message to show for a failed service call, or `fallback` when the
    /// response carried none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.problem()
            .and_then(ProblemDetails::service_message)
            .unwrap_or(fallback)
            .to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_builder() {
            ApiError::Client(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<store::StorageError> for ApiError {
    fn from(e: store::StorageError) -> Self {
        ApiError::Storage(e.to_string())
    }
}
