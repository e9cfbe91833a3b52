//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and formats.
//! Every problem is collected so one run reports all of them.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::FacadeConfig;

/// Fixed liveness route, registered beside the employee routes.
pub const HEALTH_PATH: &str = "/health";

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid upstream base URL '{url}': {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("path prefix '{0}' must start with '/' and not end with '/'")]
    PathPrefix(String),

    #[error("path prefix '{0}' collides with another route or contains route syntax")]
    PathPrefixConflict(String),

    #[error(
        "timeouts.request_secs ({inbound}) must exceed upstream.request_timeout_secs ({upstream})"
    )]
    TimeoutOrder { inbound: u64, upstream: u64 },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &FacadeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.request_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    // The inbound timeout answers with its own status, so it must never fire
    // before an upstream failure has been rendered.
    let (inbound, upstream) = (
        config.timeouts.request_secs,
        config.upstream.request_timeout_secs,
    );
    if inbound > 0 && upstream > 0 && inbound <= upstream {
        errors.push(ValidationError::TimeoutOrder { inbound, upstream });
    }

    let prefix = &config.api.path_prefix;
    if !prefix.starts_with('/') || (prefix.len() > 1 && prefix.ends_with('/')) || prefix == "/" {
        errors.push(ValidationError::PathPrefix(prefix.clone()));
    } else if prefix == HEALTH_PATH
        || prefix.contains("//")
        || prefix.contains(['{', '}', '*'])
    {
        errors.push(ValidationError::PathPrefixConflict(prefix.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
