use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of client-side errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    /// The request never produced a response (connection refused, timeout).
    Transport,
    /// The API answered with a non-2xx status.
    Api,
    /// The response body did not match the expected shape.
    Decode,
    /// Input rejected before any request was made.
    Validation,
    /// Reading or writing persisted client state failed.
    Storage,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::Transport => write!(f, "Transport"),
            AppErrorKind::Api => write!(f, "Api"),
            AppErrorKind::Decode => write!(f, "Decode"),
            AppErrorKind::Validation => write!(f, "Validation"),
            AppErrorKind::Storage => write!(f, "Storage"),
        }
    }
}

/// Structured error shared by the API client and the view-state layer.
///
/// `message` is what the user sees; views never render the `Display` form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    /// HTTP status for `Api` errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl AppError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Api,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Decode,
            message: message.into(),
            status: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Validation,
            message: message.into(),
            status: None,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::Storage,
            message: message.into(),
            status: None,
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// The API reports failures as `{"detail": ...}`. A string detail is used
    /// verbatim; a list of `{"msg": ...}` objects (request validation failures)
    /// is joined with `"; "`. Anything else falls back to `API error <status>`.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| detail_message(&v))
            .unwrap_or_else(|| format!("API error {status}"));
        Self::api(status, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

fn detail_message(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}
