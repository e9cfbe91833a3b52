//! Shared utilities for integration testing.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use uuid::Uuid;

use employee_facade::config::FacadeConfig;
use employee_facade::upstream::{DeleteEmployeeInput, Envelope, UpstreamEmployee};
use employee_facade::{EmployeeInput, HttpServer, Shutdown};

/// How the mock upstream answers collection reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Mode {
    Normal,
    EmptyBody,
    NullData,
    ServerError,
}

/// Mutable state behind the mock upstream.
pub struct MockState {
    pub records: Mutex<Vec<UpstreamEmployee>>,
    pub mode: Mutex<Mode>,
    /// One entry per request, e.g. `"GET /{id}"`.
    pub calls: Mutex<Vec<String>>,
}

impl MockState {
    fn record_call(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    #[allow(dead_code)]
    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    #[allow(dead_code)]
    pub fn set_mode(&self, mode: Mode) {
        *self.mode.lock().unwrap() = mode;
    }
}

pub fn employee(name: &str, salary: i32) -> UpstreamEmployee {
    UpstreamEmployee {
        id: Uuid::new_v4(),
        name: name.to_string(),
        salary,
        age: 30,
        title: "Engineer".to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
    }
}

/// Start a mock upstream employee service on an ephemeral port.
pub async fn start_mock_upstream(records: Vec<UpstreamEmployee>) -> (SocketAddr, Arc<MockState>) {
    let state = Arc::new(MockState {
        records: Mutex::new(records),
        mode: Mutex::new(Mode::Normal),
        calls: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route(
            "/api/v1/employee",
            get(mock_list).post(mock_create).delete(mock_delete),
        )
        .route("/api/v1/employee/{id}", get(mock_get))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, state)
}

async fn mock_list(State(state): State<Arc<MockState>>) -> Response {
    state.record_call("GET /");
    let mode = *state.mode.lock().unwrap();
    match mode {
        Mode::Normal => {
            let records = state.records.lock().unwrap().clone();
            Json(Envelope::handled(records)).into_response()
        }
        Mode::EmptyBody => StatusCode::OK.into_response(),
        Mode::NullData => {
            Json(Envelope::<Vec<UpstreamEmployee>>::failed("no data")).into_response()
        }
        Mode::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn mock_get(State(state): State<Arc<MockState>>, Path(id): Path<Uuid>) -> Response {
    state.record_call("GET /{id}");
    let found = state
        .records
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.id == id)
        .cloned();
    match found {
        Some(record) => Json(Envelope::handled(record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn mock_create(
    State(state): State<Arc<MockState>>,
    Json(input): Json<EmployeeInput>,
) -> Response {
    state.record_call("POST /");
    let mut record = employee(&input.name, input.salary);
    record.age = input.age;
    record.title = input.title;
    state.records.lock().unwrap().push(record.clone());
    Json(Envelope::handled(record)).into_response()
}

async fn mock_delete(
    State(state): State<Arc<MockState>>,
    Json(input): Json<DeleteEmployeeInput>,
) -> Response {
    state.record_call("DELETE /");
    let mut records = state.records.lock().unwrap();
    let before = records.len();
    records.retain(|e| e.name != input.name);
    Json(Envelope::handled(records.len() < before)).into_response()
}

/// Start the facade against `upstream`, letting the caller adjust config.
pub async fn start_facade<F>(upstream: SocketAddr, tweak: F) -> (SocketAddr, Shutdown)
where
    F: FnOnce(&mut FacadeConfig),
{
    let mut config = FacadeConfig::default();
    config.upstream.base_url = format!("http://{}/api/v1/employee", upstream);
    config.upstream.request_timeout_secs = 5;
    tweak(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
