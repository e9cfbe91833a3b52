//! Abstraction over the upstream employee service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::employee::EmployeeInput;
use crate::upstream::types::{UpstreamEmployee, UpstreamResult};

/// Operations the facade needs from the upstream collaborator.
///
/// `Ok(None)` means the upstream returned no usable payload.
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// Fetch every record.
    async fn fetch_all(&self) -> UpstreamResult<Option<Vec<UpstreamEmployee>>>;

    /// Fetch one record by identifier.
    async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Option<UpstreamEmployee>>;

    /// Create a record, returning what the upstream stored.
    async fn create(&self, input: &EmployeeInput) -> UpstreamResult<Option<UpstreamEmployee>>;

    /// Delete by name. The upstream keys deletion by name, not identifier.
    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool>;
}
