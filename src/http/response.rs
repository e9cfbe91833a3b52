//! Response rendering for failed operations.
//!
//! # Design Decisions
//! - By default every failure is a 500 with a generic body, so callers
//!   cannot tell "not found" from "upstream down"
//! - `distinct_error_status` switches to per-cause statuses and messages

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::employee::ServiceError;

const GENERIC_MESSAGE: &str = "Internal server error";

/// JSON body of a failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A service failure on its way to the client.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    distinct_status: bool,
}

impl ApiError {
    pub fn new(error: ServiceError, distinct_status: bool) -> Self {
        Self {
            error,
            distinct_status,
        }
    }

    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        if !self.distinct_status {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
        match self.error {
            ServiceError::InvalidId(_) | ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::UpstreamEmpty
            | ServiceError::NotDeleted
            | ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        if self.distinct_status {
            self.error.to_string()
        } else {
            GENERIC_MESSAGE.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
