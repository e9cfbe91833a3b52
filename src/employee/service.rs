//! Query layer over the upstream employee service.
//!
//! Every operation makes at most one upstream call, except
//! [`EmployeeService::delete_by_id`] which resolves the record first and then
//! deletes it by name.

use std::sync::Arc;
use uuid::Uuid;

use crate::employee::error::{ServiceError, ServiceResult};
use crate::employee::model::{Employee, EmployeeInput};
use crate::upstream::EmployeeSource;

/// Number of names returned by [`EmployeeService::top_ten_by_earning`].
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Facade operations over a shared upstream source.
#[derive(Clone)]
pub struct EmployeeService {
    source: Arc<dyn EmployeeSource>,
}

impl EmployeeService {
    /// Create a service backed by the given source.
    pub fn new(source: Arc<dyn EmployeeSource>) -> Self {
        Self { source }
    }

    /// All employees, mapped from the upstream list.
    pub async fn list_all(&self) -> ServiceResult<Vec<Employee>> {
        let records = self
            .source
            .fetch_all()
            .await?
            .ok_or(ServiceError::UpstreamEmpty)?;
        Ok(records.into_iter().map(Employee::from).collect())
    }

    /// Employees whose name contains `fragment`, ignoring case.
    ///
    /// No matches is an empty list, not an error.
    pub async fn search_by_name(&self, fragment: &str) -> ServiceResult<Vec<Employee>> {
        let needle = fragment.to_lowercase();
        let employees = self.list_all().await?;
        Ok(employees
            .into_iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// One employee by identifier.
    ///
    /// A malformed identifier fails before any upstream call.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Employee> {
        let uuid = Uuid::parse_str(id).map_err(|_| ServiceError::InvalidId(id.to_string()))?;
        self.source
            .fetch_by_id(uuid)
            .await?
            .map(Employee::from)
            .ok_or(ServiceError::NotFound)
    }

    /// Highest salary across all employees, `0` when the list is empty.
    pub async fn highest_salary(&self) -> ServiceResult<i32> {
        let employees = self.list_all().await?;
        Ok(employees.iter().map(|e| e.salary).max().unwrap_or(0))
    }

    /// Names of the ten best paid employees, highest first.
    ///
    /// Equal salaries keep the upstream's ordering.
    pub async fn top_ten_by_earning(&self) -> ServiceResult<Vec<String>> {
        let mut employees = self.list_all().await?;
        employees.sort_by(|a, b| b.salary.cmp(&a.salary));
        Ok(employees
            .into_iter()
            .take(TOP_EARNERS_LIMIT)
            .map(|e| e.name)
            .collect())
    }

    /// Create an employee upstream.
    pub async fn create(&self, input: &EmployeeInput) -> ServiceResult<Employee> {
        self.source
            .create(input)
            .await?
            .map(Employee::from)
            .ok_or(ServiceError::UpstreamEmpty)
    }

    /// Delete an employee by identifier, returning the deleted name.
    pub async fn delete_by_id(&self, id: &str) -> ServiceResult<String> {
        let employee = self.get_by_id(id).await?;
        if self.source.delete_by_name(&employee.name).await? {
            tracing::info!(id = %employee.id, name = %employee.name, "Employee deleted");
            Ok(employee.name)
        } else {
            Err(ServiceError::NotDeleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{UpstreamEmployee, UpstreamError, UpstreamResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory source with call counters.
    #[derive(Default)]
    struct FakeSource {
        records: Option<Vec<UpstreamEmployee>>,
        delete_result: bool,
        fail: bool,
        fetch_all_calls: AtomicUsize,
        fetch_by_id_calls: AtomicUsize,
        create_calls: AtomicUsize,
        deleted_names: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with_records(records: Vec<UpstreamEmployee>) -> Self {
            Self {
                records: Some(records),
                delete_result: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl EmployeeSource for FakeSource {
        async fn fetch_all(&self) -> UpstreamResult<Option<Vec<UpstreamEmployee>>> {
            self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::Status(503));
            }
            Ok(self.records.clone())
        }

        async fn fetch_by_id(&self, id: Uuid) -> UpstreamResult<Option<UpstreamEmployee>> {
            self.fetch_by_id_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .records
                .as_ref()
                .and_then(|r| r.iter().find(|e| e.id == id).cloned()))
        }

        async fn create(&self, input: &EmployeeInput) -> UpstreamResult<Option<UpstreamEmployee>> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.records.is_none() {
                return Ok(None);
            }
            Ok(Some(record(&input.name, input.salary)))
        }

        async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
            self.deleted_names.lock().unwrap().push(name.to_string());
            Ok(self.delete_result)
        }
    }

    fn record(name: &str, salary: i32) -> UpstreamEmployee {
        UpstreamEmployee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            salary,
            age: 30,
            title: "Engineer".to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        }
    }

    fn service(source: &Arc<FakeSource>) -> EmployeeService {
        EmployeeService::new(source.clone())
    }

    #[tokio::test]
    async fn test_list_all_maps_every_record() {
        let records = vec![record("John Doe", 100_000), record("Jane Roe", 90_000)];
        let source = Arc::new(FakeSource::with_records(records.clone()));

        let employees = service(&source).list_all().await.unwrap();
        assert_eq!(employees.len(), records.len());
        for (employee, record) in employees.iter().zip(records) {
            assert_eq!(*employee, Employee::from(record));
        }
    }

    #[tokio::test]
    async fn test_list_all_absent() {
        let source = Arc::new(FakeSource::default());
        let err = service(&source).list_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::UpstreamEmpty));
    }

    #[tokio::test]
    async fn test_list_all_upstream_failure() {
        let source = Arc::new(FakeSource {
            fail: true,
            ..FakeSource::default()
        });
        let err = service(&source).list_all().await.unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(UpstreamError::Status(503))));
    }

    #[tokio::test]
    async fn test_search_case_insensitive() {
        let source = Arc::new(FakeSource::with_records(vec![
            record("John Doe", 100_000),
            record("Johnny Cash", 50_000),
            record("Jane Roe", 90_000),
        ]));
        let svc = service(&source);

        let names: Vec<_> = svc
            .search_by_name("JOHN")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["John Doe", "Johnny Cash"]);

        assert_eq!(svc.search_by_name("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_no_match_is_empty() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 100_000)]));
        let result = service(&source).search_by_name("jane").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_search_absent_propagates() {
        let source = Arc::new(FakeSource::default());
        assert!(service(&source).search_by_name("john").await.is_err());
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let john = record("John Doe", 100_000);
        let source = Arc::new(FakeSource::with_records(vec![john.clone()]));

        let employee = service(&source).get_by_id(&john.id.to_string()).await.unwrap();
        assert_eq!(employee.name, "John Doe");
        assert_eq!(source.fetch_by_id_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_invalid_makes_no_call() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 1)]));

        let err = service(&source).get_by_id("invalid-id").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidId(ref id) if id == "invalid-id"));
        assert_eq!(source.fetch_by_id_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 1)]));
        let err = service(&source)
            .get_by_id(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_highest_salary() {
        let source = Arc::new(FakeSource::with_records(vec![
            record("A", 10),
            record("B", 300),
            record("C", 20),
        ]));
        assert_eq!(service(&source).highest_salary().await.unwrap(), 300);
    }

    #[tokio::test]
    async fn test_highest_salary_empty_list_is_zero() {
        let source = Arc::new(FakeSource::with_records(Vec::new()));
        assert_eq!(service(&source).highest_salary().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_highest_salary_absent() {
        let source = Arc::new(FakeSource::default());
        assert!(service(&source).highest_salary().await.is_err());
    }

    #[tokio::test]
    async fn test_top_ten_limits_and_sorts() {
        let records = (1..=15).map(|i| record(&format!("E{i}"), i * 1000)).collect();
        let source = Arc::new(FakeSource::with_records(records));

        let names = service(&source).top_ten_by_earning().await.unwrap();
        let expected: Vec<String> = (6..=15).rev().map(|i| format!("E{i}")).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_top_ten_ties_keep_upstream_order() {
        let source = Arc::new(FakeSource::with_records(vec![
            record("First", 500),
            record("Low", 100),
            record("Second", 500),
            record("Third", 500),
        ]));

        let names = service(&source).top_ten_by_earning().await.unwrap();
        assert_eq!(names, vec!["First", "Second", "Third", "Low"]);
    }

    #[tokio::test]
    async fn test_single_record_example() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 100_000)]));
        let svc = service(&source);

        assert_eq!(svc.highest_salary().await.unwrap(), 100_000);
        assert_eq!(svc.top_ten_by_earning().await.unwrap(), vec!["John Doe"]);
        assert!(svc.search_by_name("jane").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create() {
        let source = Arc::new(FakeSource::with_records(Vec::new()));
        let input = EmployeeInput {
            name: "John Doe".into(),
            salary: 100_000,
            age: 30,
            title: "Engineer".into(),
        };

        let employee = service(&source).create(&input).await.unwrap();
        assert_eq!(employee.name, "John Doe");
        assert_eq!(employee.salary, 100_000);
        assert_eq!(source.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_empty_envelope() {
        let source = Arc::new(FakeSource::default());
        let err = service(&source)
            .create(&EmployeeInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UpstreamEmpty));
    }

    #[tokio::test]
    async fn test_delete_by_id_uses_name() {
        let john = record("John Doe", 100_000);
        let source = Arc::new(FakeSource::with_records(vec![john.clone()]));

        let name = service(&source).delete_by_id(&john.id.to_string()).await.unwrap();
        assert_eq!(name, "John Doe");
        assert_eq!(*source.deleted_names.lock().unwrap(), vec!["John Doe".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_by_id_not_found_skips_delete() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 1)]));

        let err = service(&source)
            .delete_by_id(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
        assert_eq!(source.fetch_by_id_calls.load(Ordering::SeqCst), 1);
        assert!(source.deleted_names.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_invalid_makes_no_call() {
        let source = Arc::new(FakeSource::with_records(vec![record("John Doe", 1)]));

        assert!(service(&source).delete_by_id("invalid-id").await.is_err());
        assert_eq!(source.fetch_by_id_calls.load(Ordering::SeqCst), 0);
        assert!(source.deleted_names.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_id_unconfirmed() {
        let john = record("John Doe", 100_000);
        let source = Arc::new(FakeSource {
            delete_result: false,
            ..FakeSource::with_records(vec![john.clone()])
        });

        let err = service(&source)
            .delete_by_id(&john.id.to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotDeleted));
    }
}
