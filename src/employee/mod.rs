//! Employee facade: record mapping and derived queries.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (validate id, call upstream, transform)
//!     → model.rs (UpstreamEmployee → Employee)
//!     → error.rs (ServiceError on any absent result)
//! ```

pub mod error;
pub mod model;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use model::{Employee, EmployeeInput};
pub use service::EmployeeService;
