//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the employee routes
//! - Wire up middleware (request ID, tracing, timeout)
//! - Build the upstream client and query layer
//! - Serve until shutdown is requested

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::HEALTH_PATH;
use crate::config::{ApiConfig, FacadeConfig};
use crate::employee::EmployeeService;
use crate::http::employees::{
    create_employee, delete_employee, get_employee, health, highest_salary, list_employees,
    search_employees, top_ten_earners,
};
use crate::http::request::{request_id_header, request_span};
use crate::lifecycle::Shutdown;
use crate::upstream::{EmployeeSource, UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: EmployeeService,
    pub api: Arc<ApiConfig>,
}

/// HTTP server for the employee facade.
pub struct HttpServer {
    router: Router,
    config: FacadeConfig,
}

impl HttpServer {
    /// Create a server talking to the configured upstream.
    pub fn new(config: FacadeConfig) -> UpstreamResult<Self> {
        let client = UpstreamClient::new(&config.upstream)?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create a server over any employee source.
    pub fn with_source(config: FacadeConfig, source: Arc<dyn EmployeeSource>) -> Self {
        let state = AppState {
            service: EmployeeService::new(source),
            api: Arc::new(config.api.clone()),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &FacadeConfig, state: AppState) -> Router {
        let prefix = config.api.path_prefix.as_str();
        let header = request_id_header();

        Router::new()
            .route(HEALTH_PATH, get(health))
            .route(prefix, get(list_employees).post(create_employee))
            .route(&format!("{prefix}/search/{{fragment}}"), get(search_employees))
            .route(&format!("{prefix}/highestSalary"), get(highest_salary))
            .route(
                &format!("{prefix}/topTenHighestEarningEmployeeNames"),
                get(top_ten_earners),
            )
            .route(
                &format!("{prefix}/{{id}}"),
                get(get_employee).delete(delete_employee),
            )
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::new(header)),
            )
    }

    /// Router with all routes and middleware, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            prefix = %self.config.api.path_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FacadeConfig {
        &self.config
    }
}
