//! Employee facade (v1)
//!
//! A thin HTTP facade over the upstream mock employee service, built with
//! Tokio, Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                EMPLOYEE FACADE                │
//!   Client Request   │  ┌────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ employee  │──▶│ upstream  │──┼──▶ Mock
//!                    │  │ server │   │  service  │   │  client   │  │    Employee
//!   Client Response  │  │        │◀──│ map/query │◀──│ envelope  │◀─┼─── Service
//!   ◀────────────────┼──│        │   └───────────┘   └───────────┘  │
//!                    │  └────────┘                                  │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use employee_facade::config::{load_config, FacadeConfig};
use employee_facade::observability::{logging, metrics};
use employee_facade::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "employee-facade")]
#[command(about = "HTTP facade over the mock employee service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => FacadeConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!("employee-facade v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
