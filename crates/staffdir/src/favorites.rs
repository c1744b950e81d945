//! Favorites store.
//!
//! Holds the set of favorited employee ids, writes it through to local
//! storage on every toggle and publishes the new set to subscribers.
//!
//! The stored form is a JSON array of ids under the `favorites` key.

use std::collections::BTreeSet;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::Result;
use crate::storage::Storage;

/// Local storage key for the favorites array.
pub const FAVORITES_KEY: &str = "favorites";

/// A set of favorited employee ids.
pub type FavoriteSet = BTreeSet<String>;

/// Write-through favorites set with change notification.
#[derive(Debug)]
pub struct FavoritesStore {
    storage: Storage,
    publisher: watch::Sender<FavoriteSet>,
}

impl FavoritesStore {
    /// Load the persisted set (empty when absent) and take ownership of `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the stored value is not a
    /// JSON array of strings.
    pub fn open(storage: Storage) -> Result<Self> {
        let favorites = match storage.get_item(FAVORITES_KEY)? {
            Some(stored) => serde_json::from_str::<Vec<String>>(&stored)?
                .into_iter()
                .collect(),
            None => FavoriteSet::new(),
        };
        info!(count = favorites.len(), "Loaded favorites");

        let (publisher, _) = watch::channel(favorites);
        Ok(Self { storage, publisher })
    }

    /// Membership test.
    #[must_use]
    pub fn is_favorite(&self, employee_id: &str) -> bool {
        self.publisher.borrow().contains(employee_id)
    }

    /// Flip membership of `employee_id`, persist the whole set, then publish it.
    ///
    /// Returns whether the employee is a favorite afterwards. When persisting
    /// fails nothing changes in memory and nothing is published.
    ///
    /// # Errors
    ///
    /// Returns an error if the set cannot be written to storage.
    pub fn toggle_favorite(&mut self, employee_id: &str) -> Result<bool> {
        let mut next = self.get_favorites();
        let now_favorite = if next.remove(employee_id) {
            false
        } else {
            next.insert(employee_id.to_string());
            true
        };

        self.persist(&next)?;
        self.publisher.send_replace(next);
        debug!(employee_id, now_favorite, "Toggled favorite");
        Ok(now_favorite)
    }

    /// Copy of the current set.
    #[must_use]
    pub fn get_favorites(&self) -> FavoriteSet {
        self.publisher.borrow().clone()
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.publisher.borrow().len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.publisher.borrow().is_empty()
    }

    /// Observe the set. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FavoriteSet> {
        self.publisher.subscribe()
    }

    /// An empty set is stored as no key at all, which [`open`](Self::open)
    /// reads back as empty.
    fn persist(&self, favorites: &FavoriteSet) -> Result<()> {
        if favorites.is_empty() {
            self.storage.remove_item(FAVORITES_KEY)?;
            return Ok(());
        }
        let ids: Vec<&str> = favorites.iter().map(String::as_str).collect();
        self.storage
            .set_item(FAVORITES_KEY, &serde_json::to_string(&ids)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn open_store() -> FavoritesStore {
        FavoritesStore::open(Storage::open_in_memory().unwrap()).unwrap()
    }

    fn stored_ids(store: &FavoritesStore) -> FavoriteSet {
        match store.storage.get_item(FAVORITES_KEY).unwrap() {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .unwrap()
                .into_iter()
                .collect(),
            None => FavoriteSet::new(),
        }
    }

    #[test]
    fn test_empty_when_nothing_stored() {
        let store = open_store();
        assert!(store.is_empty());
        assert!(!store.is_favorite("1"));
    }

    #[test]
    fn test_loads_stored_array() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_item(FAVORITES_KEY, r#"["3","1"]"#).unwrap();

        let store = FavoritesStore::open(storage).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.is_favorite("1"));
        assert!(store.is_favorite("3"));
    }

    #[test]
    fn test_malformed_storage_is_an_error() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_item(FAVORITES_KEY, "{not json").unwrap();

        let err = FavoritesStore::open(storage).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = open_store();
        assert!(store.toggle_favorite("42").unwrap());
        assert!(store.is_favorite("42"));
        assert!(!store.toggle_favorite("42").unwrap());
        assert!(!store.is_favorite("42"));
    }

    #[test]
    fn test_double_toggle_restores_original_set() {
        let mut store = open_store();
        store.toggle_favorite("1").unwrap();
        store.toggle_favorite("2").unwrap();
        let before = store.get_favorites();

        store.toggle_favorite("3").unwrap();
        store.toggle_favorite("3").unwrap();
        assert_eq!(store.get_favorites(), before);

        store.toggle_favorite("1").unwrap();
        store.toggle_favorite("1").unwrap();
        assert_eq!(store.get_favorites(), before);
        assert_eq!(stored_ids(&store), before);
    }

    #[test]
    fn test_storage_matches_memory_after_each_toggle() {
        let mut store = open_store();
        for id in ["5", "9", "5", "1", "9"] {
            store.toggle_favorite(id).unwrap();
            assert_eq!(stored_ids(&store), store.get_favorites());
        }
        assert_eq!(
            store.get_favorites(),
            FavoriteSet::from(["1".to_string()])
        );
    }

    #[test]
    fn test_last_removal_clears_the_key() {
        let mut store = open_store();
        store.toggle_favorite("8").unwrap();
        assert_eq!(store.storage.keys().unwrap(), vec![FAVORITES_KEY.to_string()]);

        store.toggle_favorite("8").unwrap();
        assert!(store.storage.keys().unwrap().is_empty());
        assert!(stored_ids(&store).is_empty());
    }

    #[test]
    fn test_get_favorites_is_a_copy() {
        let mut store = open_store();
        store.toggle_favorite("1").unwrap();

        let mut copy = store.get_favorites();
        copy.insert("intruder".to_string());
        assert!(!store.is_favorite("intruder"));
    }

    #[test]
    fn test_toggle_publishes_to_every_subscriber() {
        let mut store = open_store();
        let mut list_rx = store.subscribe();
        let mut detail_rx = store.subscribe();

        store.toggle_favorite("7").unwrap();

        assert!(list_rx.has_changed().unwrap());
        assert!(detail_rx.has_changed().unwrap());
        assert!(list_rx.borrow_and_update().contains("7"));
        assert!(detail_rx.borrow_and_update().contains("7"));
    }

    #[test]
    fn test_subscriber_starts_at_current_value() {
        let mut store = open_store();
        store.toggle_favorite("2").unwrap();

        let rx = store.subscribe();
        assert!(rx.borrow().contains("2"));
    }

    #[test]
    fn test_persisted_across_reopen() {
        let db_path = std::env::temp_dir().join(format!(
            "staffdir_favorites_test_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_path);

        {
            let mut store = FavoritesStore::open(Storage::open(&db_path).unwrap()).unwrap();
            store.toggle_favorite("a").unwrap();
            store.toggle_favorite("b").unwrap();
        }

        let store = FavoritesStore::open(Storage::open(&db_path).unwrap()).unwrap();
        assert!(store.is_favorite("a"));
        assert!(store.is_favorite("b"));
        assert_eq!(store.len(), 2);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
    }
}
