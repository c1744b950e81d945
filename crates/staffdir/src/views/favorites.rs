//! Favorites screen.

use tokio::sync::watch;
use tracing::error;

use crate::employees::EmployeeService;
use crate::error::Result;
use crate::favorites::{FavoriteSet, FavoritesStore};
use crate::model::Employee;

/// Message shown when the employees behind the favorites cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load employees";

/// State of the favorites screen.
#[derive(Debug)]
pub struct FavoritesView {
    favorite_employees: Vec<Employee>,
    loading: bool,
    error: Option<String>,
    favorites: watch::Receiver<FavoriteSet>,
}

impl FavoritesView {
    /// Create the view, subscribed to `favorites`.
    #[must_use]
    pub fn new(favorites: &FavoritesStore) -> Self {
        Self {
            favorite_employees: Vec::new(),
            loading: true,
            error: None,
            favorites: favorites.subscribe(),
        }
    }

    /// Load employees and keep the favorited ones.
    pub async fn load(&mut self, service: &mut EmployeeService) {
        self.loading = true;
        match service.get_employees().await {
            Ok(employees) => {
                let favorite_ids = self.favorites.borrow_and_update().clone();
                self.favorite_employees = employees
                    .iter()
                    .filter(|employee| favorite_ids.contains(&employee.id))
                    .cloned()
                    .collect();
            }
            Err(err) => {
                error!("Error loading employees: {err}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Apply a pending favorites publication.
    ///
    /// Without fresh employee data the view can only drop entries that are no
    /// longer favorites; newly added favorites appear on the next [`load`].
    /// Returns `true` when a publication was consumed.
    ///
    /// [`load`]: Self::load
    pub fn sync(&mut self) -> bool {
        if !self.favorites.has_changed().unwrap_or(false) {
            return false;
        }
        let current = self.favorites.borrow_and_update().clone();
        self.favorite_employees
            .retain(|employee| current.contains(&employee.id));
        true
    }

    /// Toggle a favorite from this screen and apply the publication.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be persisted.
    pub fn toggle_favorite(&mut self, store: &mut FavoritesStore, employee_id: &str) -> Result<bool> {
        let now_favorite = store.toggle_favorite(employee_id)?;
        self.sync();
        Ok(now_favorite)
    }

    /// Favorited employees currently shown.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.favorite_employees
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
