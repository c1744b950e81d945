//! Employee detail screen: profile, favorite toggle and notes.

use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::employees::EmployeeService;
use crate::error::Result;
use crate::favorites::{FavoriteSet, FavoritesStore};
use crate::model::{Employee, Note};
use crate::notes::NotesService;

/// Shown when the id is not in the directory.
pub const NOT_FOUND: &str = "Employee not found";

/// Shown when the directory cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load employee details";

/// Shown when a note cannot be created.
pub const NOTE_FAILED: &str = "Failed to create note. Please try again.";

/// What happened to a note submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to submit (no employee, or blank draft).
    Skipped,
    /// The server stored the note; it now heads the list.
    Created(Note),
    /// The server rejected or never received the note.
    Failed(String),
}

/// State of the detail screen for one employee.
#[derive(Debug)]
pub struct EmployeeDetailView {
    employee_id: String,
    employee: Option<Employee>,
    notes: Vec<Note>,
    draft: String,
    loading: bool,
    loading_notes: bool,
    submitting_note: bool,
    error: Option<String>,
    favorites: watch::Receiver<FavoriteSet>,
}

impl EmployeeDetailView {
    /// Create the view for `employee_id`, subscribed to `favorites`.
    #[must_use]
    pub fn new(employee_id: impl Into<String>, favorites: &FavoritesStore) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee: None,
            notes: Vec::new(),
            draft: String::new(),
            loading: true,
            loading_notes: true,
            submitting_note: false,
            error: None,
            favorites: favorites.subscribe(),
        }
    }

    /// Load the employee and the notes. The two requests run concurrently.
    pub async fn load(&mut self, employees: &mut EmployeeService, notes: &NotesService) {
        self.loading = true;
        self.loading_notes = true;
        self.error = None;

        let id = self.employee_id.clone();
        let (employee_result, notes_result) =
            tokio::join!(employees.get_employees(), notes.get_notes_for_employee(&id));

        match employee_result {
            Ok(list) => {
                debug!(count = list.len(), employee_id = %id, "Looking up employee");
                self.employee = list.iter().find(|employee| employee.id == id).cloned();
                if self.employee.is_none() {
                    warn!(employee_id = %id, "Employee not found");
                    self.error = Some(NOT_FOUND.to_string());
                }
            }
            Err(err) => {
                error!("Error loading employee: {err}");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;

        match notes_result {
            Ok(notes) => self.notes = notes,
            Err(err) => error!("Error loading notes: {err}"),
        }
        self.loading_notes = false;
    }

    /// Replace the note draft.
    pub fn set_draft(&mut self, content: &str) {
        content.clone_into(&mut self.draft);
    }

    /// Submit the draft.
    ///
    /// A blank draft or a missing employee is skipped. The note is prepended
    /// only once the server has confirmed it; on failure the list and the
    /// draft are left untouched.
    pub async fn submit_note(&mut self, notes: &NotesService) -> SubmitOutcome {
        let Some(employee) = &self.employee else {
            return SubmitOutcome::Skipped;
        };
        if self.draft.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        self.submitting_note = true;
        let result = notes.create_note(&employee.id, &self.draft).await;
        self.submitting_note = false;

        match result {
            Ok(note) => {
                if note.employee_id == self.employee_id {
                    self.notes.insert(0, note.clone());
                } else {
                    warn!(
                        expected = %self.employee_id,
                        got = %note.employee_id,
                        "Server returned a note for another employee"
                    );
                }
                self.draft.clear();
                SubmitOutcome::Created(note)
            }
            Err(err) => {
                error!("Error creating note: {err}");
                SubmitOutcome::Failed(NOTE_FAILED.to_string())
            }
        }
    }

    /// Whether the shown employee is a favorite. `false` before load.
    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.employee
            .as_ref()
            .is_some_and(|employee| self.favorites.borrow().contains(&employee.id))
    }

    /// Toggle the shown employee. `None` when nothing is shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be persisted.
    pub fn toggle_favorite(&self, store: &mut FavoritesStore) -> Result<Option<bool>> {
        match &self.employee {
            Some(employee) => store.toggle_favorite(&employee.id).map(Some),
            None => Ok(None),
        }
    }

    /// Requested employee id.
    #[must_use]
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// The employee, once found.
    #[must_use]
    pub fn employee(&self) -> Option<&Employee> {
        self.employee.as_ref()
    }

    /// Notes, newest submission first.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Current note draft.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether the employee is still loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether notes are still loading.
    #[must_use]
    pub fn is_loading_notes(&self) -> bool {
        self.loading_notes
    }

    /// Whether a note submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting_note
    }

    /// User-facing error, if loading failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
