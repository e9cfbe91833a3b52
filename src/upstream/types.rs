//! Upstream wire types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Status tag the upstream attaches to a handled request.
pub const STATUS_HANDLED: &str = "Successfully processed request.";

/// Status tag the upstream attaches to a failed request.
pub const STATUS_ERROR: &str = "Failed to process request.";

/// Employee record as served by the upstream mock service.
///
/// Field names carry the upstream's `employee_` prefix on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamEmployee {
    pub id: Uuid,
    #[serde(rename = "employee_name")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    pub salary: i32,
    #[serde(rename = "employee_age")]
    pub age: i32,
    #[serde(rename = "employee_title")]
    pub title: String,
    #[serde(rename = "employee_email", default)]
    pub email: String,
}

/// Generic wrapper around every upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Payload; legitimately absent when the upstream has nothing to return.
    pub data: Option<T>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Wrap a payload with the handled status tag.
    pub fn handled(data: T) -> Self {
        Self {
            data: Some(data),
            status: STATUS_HANDLED.to_string(),
            error: None,
        }
    }

    /// An envelope reporting failure without a payload.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: None,
            status: STATUS_ERROR.to_string(),
            error: Some(error.into()),
        }
    }
}

/// Body the upstream expects when deleting by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    pub name: String,
}

/// Errors raised while talking to the upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or protocol failure.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// Body could not be decoded into the expected envelope.
    #[error("upstream payload could not be decoded: {0}")]
    Decode(String),

    /// Base URL cannot address single records.
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
