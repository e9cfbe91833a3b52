//! Error kinds for facade operations.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Why a facade operation produced no usable result.
///
/// The HTTP layer may collapse all of these into one status; the kind is kept
/// for logging and for the optional per-cause rendering.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Identifier is not a UUID; no upstream call was made.
    #[error("invalid employee id '{0}'")]
    InvalidId(String),

    /// Create payload violates the upstream's rules.
    #[error("invalid employee input: {0}")]
    InvalidInput(String),

    /// Upstream had no record for the identifier.
    #[error("employee not found")]
    NotFound,

    /// Upstream answered without a payload.
    #[error("upstream returned no data")]
    UpstreamEmpty,

    /// Upstream did not confirm a deletion.
    #[error("upstream did not confirm deletion")]
    NotDeleted,

    /// Upstream call failed outright.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ServiceError {
    /// Short stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidId(_) => "invalid_id",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::NotFound => "not_found",
            ServiceError::UpstreamEmpty => "upstream_empty",
            ServiceError::NotDeleted => "not_deleted",
            ServiceError::Upstream(_) => "upstream_error",
        }
    }
}

/// Result type for facade operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
