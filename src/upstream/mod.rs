//! Upstream employee service integration.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → source.rs (EmployeeSource trait)
//!     → client.rs (reqwest calls against the base endpoint)
//!     → types.rs (Envelope<T> decode, UpstreamEmployee)
//!     → Option<payload> back to the service
//! ```
//!
//! # Design Decisions
//! - Absence (empty body, null payload, 404) is `Ok(None)`, not an error
//! - Transport and status failures stay typed so callers can log the cause
//! - Delete is keyed by name because the upstream contract is

pub mod client;
pub mod source;
pub mod types;

pub use client::UpstreamClient;
pub use source::EmployeeSource;
pub use types::{
    DeleteEmployeeInput, Envelope, UpstreamEmployee, UpstreamError, UpstreamResult,
};
