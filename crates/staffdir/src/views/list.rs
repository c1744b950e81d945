//! Employee list screen.

use tokio::sync::watch;
use tracing::error;

use crate::employees::{EmployeeList, EmployeeService};
use crate::error::Result;
use crate::favorites::{FavoriteSet, FavoritesStore};
use crate::model::{filter_employees, Employee};

/// Message shown when the list cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load employees. Please try again later.";

/// State of the employee list screen.
#[derive(Debug)]
pub struct EmployeeListView {
    employees: EmployeeList,
    filtered: Vec<Employee>,
    search_term: String,
    loading: bool,
    error: Option<String>,
    favorites: watch::Receiver<FavoriteSet>,
}

impl EmployeeListView {
    /// Create the view, subscribed to `favorites`.
    #[must_use]
    pub fn new(favorites: &FavoritesStore) -> Self {
        Self {
            employees: EmployeeList::from(Vec::new()),
            filtered: Vec::new(),
            search_term: String::new(),
            loading: true,
            error: None,
            favorites: favorites.subscribe(),
        }
    }

    /// Load employees; on failure keep whatever was shown and set the error.
    pub async fn load(&mut self, service: &mut EmployeeService) {
        self.loading = true;
        self.error = None;

        match service.get_employees().await {
            Ok(employees) => {
                self.employees = employees;
                self.apply_search();
            }
            Err(err) => {
                error!("Error loading employees: {err}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Set the search term and refilter.
    pub fn set_search_term(&mut self, term: &str) {
        term.clone_into(&mut self.search_term);
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.filtered = filter_employees(&self.employees, &self.search_term);
    }

    /// Toggle a favorite from this screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be persisted.
    pub fn toggle_favorite(&self, store: &mut FavoritesStore, employee_id: &str) -> Result<bool> {
        store.toggle_favorite(employee_id)
    }

    /// Whether `employee_id` is a favorite, as last published.
    #[must_use]
    pub fn is_favorite(&self, employee_id: &str) -> bool {
        self.favorites.borrow().contains(employee_id)
    }

    /// Employees matching the current search.
    #[must_use]
    pub fn filtered(&self) -> &[Employee] {
        &self.filtered
    }

    /// Every loaded employee.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Current search term as typed.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether a load is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing error, if the last load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
