//! Employee data access with an in-memory cache.
//!
//! The first [`EmployeeService::get_employees`] call hits the API; later calls
//! are served from the cache until [`EmployeeService::clear_cache`]. Every
//! change to the cached collection is published on a `watch` channel so that
//! any number of views observe the same list.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::DirectoryApi;
use crate::error::Result;
use crate::model::Employee;

/// Shared, immutable employee collection.
pub type EmployeeList = Arc<[Employee]>;

/// Cached access to the employee directory.
pub struct EmployeeService {
    api: Arc<dyn DirectoryApi>,
    cache: Option<EmployeeList>,
    publisher: watch::Sender<EmployeeList>,
}

impl std::fmt::Debug for EmployeeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeService")
            .field("cached", &self.cache.as_ref().map(|list| list.len()))
            .field("subscribers", &self.publisher.receiver_count())
            .finish_non_exhaustive()
    }
}

impl EmployeeService {
    /// Create a service with an empty cache.
    #[must_use]
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        let (publisher, _) = watch::channel(EmployeeList::from(Vec::new()));
        Self {
            api,
            cache: None,
            publisher,
        }
    }

    /// Return the cached list, fetching and publishing it on a cache miss.
    ///
    /// A failed fetch leaves the cache empty and publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns the API error when the list has to be fetched and the fetch fails.
    pub async fn get_employees(&mut self) -> Result<EmployeeList> {
        if let Some(cached) = &self.cache {
            debug!(count = cached.len(), "Employee cache hit");
            return Ok(Arc::clone(cached));
        }

        let employees: EmployeeList = self.api.fetch_employees().await?.into();
        info!(count = employees.len(), "Loaded employees");
        self.cache = Some(Arc::clone(&employees));
        self.publisher.send_replace(Arc::clone(&employees));
        Ok(employees)
    }

    /// Look an employee up in the cache only. `None` when not cached.
    #[must_use]
    pub fn get_employee_by_id(&self, id: &str) -> Option<Employee> {
        self.cache
            .as_ref()
            .and_then(|list| list.iter().find(|employee| employee.id == id).cloned())
    }

    /// Drop the cache and publish an empty collection.
    pub fn clear_cache(&mut self) {
        debug!("Clearing employee cache");
        self.cache = None;
        self.publisher.send_replace(EmployeeList::from(Vec::new()));
    }

    /// Whether a list is currently cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Observe the employee collection. Starts at the latest publication.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EmployeeList> {
        self.publisher.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::api::fake::FakeDirectoryApi;
    use crate::model::fixtures::roster;

    fn service_with(api: &Arc<FakeDirectoryApi>) -> EmployeeService {
        EmployeeService::new(Arc::clone(api) as Arc<dyn DirectoryApi>)
    }

    #[tokio::test]
    async fn test_first_call_fetches() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        let mut service = service_with(&api);

        let employees = service.get_employees().await.unwrap();
        assert_eq!(employees.len(), 4);
        assert_eq!(api.employee_calls(), 1);
        assert!(service.is_cached());
    }

    #[tokio::test]
    async fn test_cached_list_skips_network() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        let mut service = service_with(&api);

        let first = service.get_employees().await.unwrap();
        let second = service.get_employees().await.unwrap();

        assert_eq!(api.employee_calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_publishes_once_per_fetch() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        let mut service = service_with(&api);
        let mut rx = service.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        service.get_employees().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 4);

        // Cache hit: nothing new published
        service.get_employees().await.unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_get_employee_by_id_uses_cache_only() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        let mut service = service_with(&api);

        assert!(service.get_employee_by_id("2").is_none());
        assert_eq!(api.employee_calls(), 0);

        service.get_employees().await.unwrap();
        let grace = service.get_employee_by_id("2").unwrap();
        assert_eq!(grace.first_name, "Grace");
        assert!(service.get_employee_by_id("999").is_none());
    }

    #[tokio::test]
    async fn test_clear_cache_publishes_empty_and_refetches() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        let mut service = service_with(&api);
        service.get_employees().await.unwrap();

        let mut rx = service.subscribe();
        rx.borrow_and_update();

        service.clear_cache();
        assert!(!service.is_cached());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());
        assert!(service.get_employee_by_id("1").is_none());

        service.get_employees().await.unwrap();
        assert_eq!(api.employee_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_empty() {
        let api = Arc::new(FakeDirectoryApi::with_employees(roster()));
        api.fail_employees.store(true, Ordering::SeqCst);
        let mut service = service_with(&api);
        let rx = service.subscribe();

        let err = service.get_employees().await.unwrap_err();
        assert!(err.is_remote());
        assert!(!service.is_cached());
        assert!(!rx.has_changed().unwrap());

        // No retry was attempted; the next call tries again
        api.fail_employees.store(false, Ordering::SeqCst);
        service.get_employees().await.unwrap();
        assert_eq!(api.employee_calls(), 2);
    }

    #[test]
    fn test_debug_reports_cache_state() {
        let api = Arc::new(FakeDirectoryApi::default());
        let service = service_with(&api);
        let debug_str = format!("{service:?}");
        assert!(debug_str.contains("EmployeeService"));
        assert!(debug_str.contains("cached: None"));
    }
}
