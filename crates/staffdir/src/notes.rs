//! Notes access. Nothing here is cached.

use std::sync::Arc;

use tracing::info;

use crate::api::DirectoryApi;
use crate::error::Result;
use crate::model::{CreateNoteRequest, Note};

/// Reads and creates employee notes through the API.
#[derive(Clone)]
pub struct NotesService {
    api: Arc<dyn DirectoryApi>,
}

impl std::fmt::Debug for NotesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesService").finish_non_exhaustive()
    }
}

impl NotesService {
    /// Create a notes service over `api`.
    #[must_use]
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self { api }
    }

    /// Fetch the notes of one employee.
    ///
    /// # Errors
    ///
    /// Returns the API error if the request fails.
    pub async fn get_notes_for_employee(&self, employee_id: &str) -> Result<Vec<Note>> {
        self.api.fetch_notes(employee_id).await
    }

    /// Post a new note and return it as the server stored it.
    ///
    /// # Errors
    ///
    /// Returns the API error if the request fails.
    pub async fn create_note(&self, employee_id: &str, content: &str) -> Result<Note> {
        let note = self
            .api
            .create_note(employee_id, &CreateNoteRequest::new(content))
            .await?;
        info!(employee_id, note_id = %note.id, "Created note");
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeDirectoryApi;
    use crate::model::fixtures::note;

    #[tokio::test]
    async fn test_notes_are_not_cached() {
        let api = Arc::new(
            FakeDirectoryApi::default().with_notes("1", vec![note("n1", "1", "hello")]),
        );
        let service = NotesService::new(Arc::clone(&api) as Arc<dyn DirectoryApi>);

        assert_eq!(service.get_notes_for_employee("1").await.unwrap().len(), 1);
        assert_eq!(service.get_notes_for_employee("1").await.unwrap().len(), 1);
        assert_eq!(api.note_calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_employee_has_no_notes() {
        let api = Arc::new(FakeDirectoryApi::default());
        let service = NotesService::new(api);
        assert!(service.get_notes_for_employee("x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_note_returns_server_note() {
        let api = Arc::new(FakeDirectoryApi::default());
        let service = NotesService::new(Arc::clone(&api) as Arc<dyn DirectoryApi>);

        let created = service.create_note("2", "Prefers email").await.unwrap();
        assert_eq!(created.employee_id, "2");
        assert_eq!(created.content, "Prefers email");
        assert_eq!(api.create_calls(), 1);

        let listed = service.get_notes_for_employee("2").await.unwrap();
        assert_eq!(listed[0], created);
    }
}
