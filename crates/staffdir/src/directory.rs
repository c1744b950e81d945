//! Wiring of the API client, local storage and the three services.

use std::sync::Arc;

use crate::api::{DirectoryApi, HttpDirectoryApi};
use crate::config::Config;
use crate::employees::EmployeeService;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::notes::NotesService;
use crate::storage::Storage;

/// Everything a view needs, owned in one place for the session.
#[derive(Debug)]
pub struct Directory {
    /// Cached employee list.
    pub employees: EmployeeService,
    /// Persisted favorites.
    pub favorites: FavoritesStore,
    /// Employee notes.
    pub notes: NotesService,
}

impl Directory {
    /// Build the HTTP client and open local storage as configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built, storage cannot be
    /// opened, or the stored favorites are unreadable.
    pub fn open(config: &Config) -> Result<Self> {
        let api = Arc::new(HttpDirectoryApi::from_config(config)?);
        let storage = Storage::open(config.database_path())?;
        Self::from_parts(api, storage)
    }

    /// Assemble from an existing API implementation and storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored favorites are unreadable.
    pub fn from_parts(api: Arc<dyn DirectoryApi>, storage: Storage) -> Result<Self> {
        Ok(Self {
            employees: EmployeeService::new(Arc::clone(&api)),
            favorites: FavoritesStore::open(storage)?,
            notes: NotesService::new(api),
        })
    }
}
