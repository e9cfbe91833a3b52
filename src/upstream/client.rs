//! HTTP client for the upstream employee service.
//!
//! # Responsibilities
//! - Issue GET/POST/DELETE requests against one base endpoint
//! - Decode the generic envelope
//! - Normalize empty bodies, null payloads and 404s into absence
//!
//! No retries: one attempt per call, bounded by the configured timeouts.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use url::Url;
use uuid::Uuid;

use crate::config::UpstreamConfig;
use crate::employee::EmployeeInput;
use crate::observability::metrics;
use crate::upstream::source::EmployeeSource;
use crate::upstream::types::{
    DeleteEmployeeInput, Envelope, UpstreamEmployee, UpstreamError, UpstreamResult,
};

/// Reqwest-backed upstream client.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(base_url = %base_url, "Upstream client initialized");

        Ok(Self { client, base_url })
    }

    /// Base endpoint this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of a single record: `{base}/{id}`.
    fn record_url(&self, id: Uuid) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> UpstreamResult<Option<T>> {
        let start = Instant::now();
        let result = match request.send().await {
            Ok(response) => read_envelope::<T>(response).await,
            Err(e) => Err(UpstreamError::Transport(e)),
        };

        let outcome = match &result {
            Ok(Some(_)) => "ok",
            Ok(None) => "empty",
            Err(_) => "error",
        };
        metrics::record_upstream_call(operation, outcome, start);

        match &result {
            Err(e) => tracing::warn!(operation, error = %e, "Upstream call failed"),
            Ok(None) => tracing::debug!(operation, "Upstream returned no payload"),
            Ok(Some(_)) => tracing::debug!(operation, "Upstream call succeeded"),
        }

        result
    }
}

/// Decode a response into the envelope payload.
///
/// Empty body, `null` body, null payload and 404 all mean "absent".
async fn read_envelope<T: DeserializeOwned>(response: Response) -> UpstreamResult<Option<T>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(UpstreamError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    decode_envelope(&body)
}

fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> UpstreamResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: Option<Envelope<T>> =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

    if let Some(Envelope { error: Some(error), .. }) = &envelope {
        tracing::debug!(error = %error, "Upstream envelope carries an error message");
    }
    Ok(envelope.and_then(|e| e.data))
}

#[async_trait]
impl EmployeeSource for UpstreamClient {
    async fn fetch_all(&self) -> UpstreamResult<Option<Vec<UpstreamEmployee>>> {
        let request = self.client.request(Method::GET, self.base_url.clone());
        self.call("fetch_all", request).await
    }

    async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Option<UpstreamEmployee>> {
        let request = self.client.request(Method::GET, self.record_url(id));
        self.call("fetch_by_id", request).await
    }

    async fn create(&self, input: &EmployeeInput) -> UpstreamResult<Option<UpstreamEmployee>> {
        let request = self
            .client
            .request(Method::POST, self.base_url.clone())
            .json(input);
        self.call("create", request).await
    }

    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
        let body = DeleteEmployeeInput {
            name: name.to_string(),
        };
        let request = self
            .client
            .request(Method::DELETE, self.base_url.clone())
            .json(&body);
        let deleted: Option<bool> = self.call("delete_by_name", request).await?;
        Ok(deleted.unwrap_or(false))
    }
}
