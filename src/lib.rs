//! Employee facade library.
//!
//! Proxies an upstream employee service, reshapes its records and adds
//! search, salary ranking and top-N queries on top.

pub mod config;
pub mod employee;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::FacadeConfig;
pub use employee::{Employee, EmployeeInput, EmployeeService, ServiceError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::{EmployeeSource, UpstreamClient};
