//! Edit Session
//!
//! State of the detail/edit page: the snapshot loaded from the server, the
//! live form values, and where the page is in the save/delete lifecycle.

use crate::models::{Todo, TodoPatch};

/// Editable fields as they sit in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub note: String,
    pub completed: bool,
}

impl EditForm {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            note: todo.note.clone(),
            completed: todo.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// Form equals the snapshot
    Clean,
    /// Form differs from the snapshot
    Dirty,
    /// PATCH in flight
    Saving,
    /// Last save failed; form still differs from the snapshot
    Error(String),
    /// Waiting for the user to confirm deletion
    ConfirmingDelete,
    /// DELETE in flight
    Deleting,
    Deleted,
}

/// Why an action was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Title is blank
    Validation(String),
    /// Nothing to save
    NotDirty,
    /// Action not allowed in the current state
    Busy,
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::Validation(msg) => write!(f, "{}", msg),
            EditError::NotDirty => write!(f, "No changes to save"),
            EditError::Busy => write!(f, "Please wait for the current action to finish"),
        }
    }
}

impl std::error::Error for EditError {}

/// What `cancel` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Nothing was changed
    Unchanged,
    /// Dirty form and no confirmation yet
    NeedsConfirmation,
    /// Form reverted to the snapshot
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    snapshot: Todo,
    form: EditForm,
    state: EditState,
}

impl EditSession {
    pub fn load(todo: Todo) -> Self {
        log::debug!("[EDIT] loaded todo {}", todo.id);
        Self {
            form: EditForm::from_todo(&todo),
            snapshot: todo,
            state: EditState::Clean,
        }
    }

    pub fn snapshot(&self) -> &Todo {
        &self.snapshot
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Field-by-field comparison against the snapshot
    pub fn has_unsaved_changes(&self) -> bool {
        self.form != EditForm::from_todo(&self.snapshot)
    }

    pub fn title_is_valid(&self) -> bool {
        !self.form.title.trim().is_empty()
    }

    pub fn can_save(&self) -> bool {
        self.title_is_valid() && matches!(self.state, EditState::Dirty | EditState::Error(_))
    }

    /// In-flight requests lock the form
    pub fn is_busy(&self) -> bool {
        matches!(self.state, EditState::Saving | EditState::Deleting | EditState::Deleted)
    }

    /// Browser should warn before leaving the page
    pub fn warn_on_unload(&self) -> bool {
        self.has_unsaved_changes() && !matches!(self.state, EditState::Deleted)
    }

    // ========================
    // Field edits
    // ========================

    pub fn set_title(&mut self, title: String) {
        self.edit(|form| form.title = title);
    }

    pub fn set_note(&mut self, note: String) {
        self.edit(|form| form.note = note);
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.edit(|form| form.completed = completed);
    }

    fn edit(&mut self, change: impl FnOnce(&mut EditForm)) {
        if self.is_busy() {
            return;
        }
        change(&mut self.form);
        if !matches!(self.state, EditState::ConfirmingDelete) {
            self.state = self.resting_state();
        }
    }

    /// Clean or Dirty, from the form alone. A pending error survives while
    /// the form still differs.
    fn resting_state(&self) -> EditState {
        match (&self.state, self.has_unsaved_changes()) {
            (_, false) => EditState::Clean,
            (EditState::Error(msg), true) => EditState::Error(msg.clone()),
            (_, true) => EditState::Dirty,
        }
    }

    // ========================
    // Save
    // ========================

    /// Validate and move to Saving; returns the PATCH body for all editable fields
    pub fn begin_save(&mut self) -> Result<TodoPatch, EditError> {
        if self.is_busy() || matches!(self.state, EditState::ConfirmingDelete) {
            return Err(EditError::Busy);
        }
        if !self.title_is_valid() {
            return Err(EditError::Validation("Title is required".to_string()));
        }
        if !self.has_unsaved_changes() {
            return Err(EditError::NotDirty);
        }
        self.state = EditState::Saving;
        Ok(TodoPatch {
            title: Some(self.form.title.clone()),
            note: Some(self.form.note.clone()),
            completed: Some(self.form.completed),
        })
    }

    /// Adopt the server's copy as the new snapshot
    pub fn save_succeeded(&mut self, saved: Todo) {
        log::debug!("[EDIT] saved todo {}", saved.id);
        self.form = EditForm::from_todo(&saved);
        self.snapshot = saved;
        self.state = EditState::Clean;
    }

    pub fn save_failed(&mut self, message: String) {
        log::debug!("[EDIT] save failed: {}", message);
        self.state = EditState::Error(message);
    }

    // ========================
    // Cancel
    // ========================

    /// Revert to the snapshot. A dirty form needs `confirmed`.
    pub fn cancel(&mut self, confirmed: bool) -> CancelOutcome {
        if self.is_busy() || !self.has_unsaved_changes() {
            return CancelOutcome::Unchanged;
        }
        if !confirmed {
            return CancelOutcome::NeedsConfirmation;
        }
        self.form = EditForm::from_todo(&self.snapshot);
        self.state = EditState::Clean;
        CancelOutcome::Discarded
    }

    // ========================
    // Delete
    // ========================

    pub fn request_delete(&mut self) -> Result<(), EditError> {
        if self.is_busy() {
            return Err(EditError::Busy);
        }
        self.state = EditState::ConfirmingDelete;
        Ok(())
    }

    pub fn dismiss_delete(&mut self) {
        if matches!(self.state, EditState::ConfirmingDelete) {
            self.state = self.resting_state();
        }
    }

    /// Confirmation given; Deleting until the server answers
    pub fn confirm_delete(&mut self) -> Result<u64, EditError> {
        if !matches!(self.state, EditState::ConfirmingDelete) {
            return Err(EditError::Busy);
        }
        self.state = EditState::Deleting;
        Ok(self.snapshot.id)
    }

    pub fn delete_succeeded(&mut self) {
        self.state = EditState::Deleted;
    }

    /// Record stays; back to whatever the form implies
    pub fn delete_failed(&mut self) {
        self.state = if self.has_unsaved_changes() { EditState::Dirty } else { EditState::Clean };
    }
}
