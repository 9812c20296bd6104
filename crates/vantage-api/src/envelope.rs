use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Status block carried by every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub code: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// `{"meta": {...}, "body": ...}` wrapper around every payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(body: T) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: T) -> Self {
        Self {
            meta: meta(status, "success"),
            body: Some(body),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            meta: meta(status, message),
            body: None,
        }
    }
}

fn meta(status: StatusCode, message: impl Into<String>) -> Meta {
    Meta {
        code: status.as_u16(),
        kind: status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_ascii_uppercase()
            .replace(' ', "_"),
        message: message.into(),
    }
}
