//! View state controller.
//!
//! Owns the fetched collection and the [`ViewState`], and turns user actions
//! into store calls. Mutations and their refetch run sequentially through
//! `&mut self`; list responses carry a [`RefreshTicket`] so a late response
//! from an older refresh never replaces a newer collection.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use simplenotes_core::{Error, Note, NoteId, NoteStore, Result};

use crate::filter::{NoteListView, SortOrder, TagFilter};
use crate::state::{Draft, Modal, Operation, Status, ViewState};

/// Sequence number handed out when a refresh starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// What happened to a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was replaced; carries the new size.
    Applied(usize),
    /// A newer response was already applied; this one was dropped.
    Stale,
}

/// Drives the interface over a [`NoteStore`].
pub struct NotesController<S> {
    store: S,
    notes: Vec<Note>,
    state: ViewState,
    issued: u64,
    applied: u64,
}

impl<S: NoteStore> NotesController<S> {
    pub fn new(store: S) -> Self {
        Self::with_state(store, ViewState::default())
    }

    /// Start from a previously saved view state. Any open dialog is kept.
    pub fn with_state(store: S, state: ViewState) -> Self {
        Self {
            store,
            notes: Vec::new(),
            state,
            issued: 0,
            applied: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The collection as last fetched, in server order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.state.status
    }

    /// Notes to display under the current search, filter and ordering.
    pub fn visible(&self) -> NoteListView<'_> {
        self.state.visible(&self.notes)
    }

    // ------------------------------------------------------------------
    // Search and filter
    // ------------------------------------------------------------------

    pub fn set_search_text(&mut self, search_text: impl Into<String>) {
        self.state.search_text = search_text.into();
    }

    pub fn set_tag_filter(&mut self, filter: TagFilter) {
        debug!(subsystem = "view", tag = %filter, "Tag filter changed");
        self.state.active_tag = filter;
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.state.sort_order = order;
    }

    pub fn dismiss_status(&mut self) {
        self.state.status = Status::Ready;
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetch the collection and apply it.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        let ticket = self.begin_refresh();
        let result = self.store.list_notes().await;
        self.apply_refresh(ticket, result)
    }

    /// Reserve a ticket for a list request about to be issued.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply the response of the list request started with `ticket`.
    ///
    /// Responses older than the last applied one are dropped, errors
    /// included. A failed refresh keeps the previous collection.
    pub fn apply_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Note>>,
    ) -> Result<RefreshOutcome> {
        if ticket.0 <= self.applied {
            warn!(
                subsystem = "view",
                ticket = ticket.sequence(),
                applied = self.applied,
                "Dropping stale list response"
            );
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(notes) => {
                self.applied = ticket.0;
                self.notes = notes;
                debug!(
                    subsystem = "view",
                    ticket = ticket.sequence(),
                    result_count = self.notes.len(),
                    "Applied list response"
                );
                Ok(RefreshOutcome::Applied(self.notes.len()))
            }
            Err(e) => {
                self.fail(Operation::Refresh, &e);
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Composing
    // ------------------------------------------------------------------

    /// Open the add-note form with a fresh draft.
    pub fn open_compose(&mut self) -> Result<()> {
        if let Some(id) = self.state.pending_delete_id() {
            return Err(Error::InvalidInput(format!(
                "cannot compose while deletion of note {} awaits confirmation",
                id
            )));
        }
        self.state.draft = Draft::default();
        self.state.modal = Modal::Composing;
        debug!(subsystem = "view", "Compose opened");
        Ok(())
    }

    /// Editable draft. Changes only matter while composing.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.state.draft
    }

    /// Close the form and discard the draft.
    pub fn cancel_compose(&mut self) {
        if self.state.is_composing() {
            self.state.modal = Modal::Closed;
        }
        self.state.draft = Draft::default();
        debug!(subsystem = "view", "Compose cancelled");
    }

    /// Submit the draft stamped with the current time.
    pub async fn submit_draft(&mut self) -> Result<()> {
        self.submit_draft_at(Utc::now()).await
    }

    /// Submit the draft stamped with `date`.
    ///
    /// On success the form closes, the draft resets and the list is
    /// refetched; a failing refetch shows up in the status but the submit
    /// still counts as done. On failure the form stays open with the draft
    /// untouched.
    pub async fn submit_draft_at(&mut self, date: DateTime<Utc>) -> Result<()> {
        if !self.state.is_composing() {
            return Err(Error::InvalidInput(
                "no note is being composed".to_string(),
            ));
        }

        let new_note = match self.state.draft.to_new_note(date) {
            Ok(note) => note,
            Err(e) => {
                self.fail(Operation::Create, &e);
                return Err(e);
            }
        };

        if let Err(e) = self.store.create_note(&new_note).await {
            self.fail(Operation::Create, &e);
            return Err(e);
        }

        info!(subsystem = "view", tag = %new_note.tag(), "Note saved");
        self.state.modal = Modal::Closed;
        self.state.draft = Draft::default();
        self.state.status = Status::Info {
            message: "Note saved".to_string(),
        };
        // refresh() records its own failure in the status
        let _ = self.refresh().await;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Deleting
    // ------------------------------------------------------------------

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: NoteId) -> Result<()> {
        if self.state.is_composing() {
            return Err(Error::InvalidInput(
                "cannot delete while a note is being composed".to_string(),
            ));
        }
        debug!(subsystem = "view", note_id = %id, "Delete requested");
        self.state.modal = Modal::ConfirmingDelete { note_id: id };
        Ok(())
    }

    /// Close the confirmation without deleting.
    pub fn cancel_delete(&mut self) {
        if self.state.pending_delete_id().is_some() {
            self.state.modal = Modal::Closed;
            debug!(subsystem = "view", "Delete cancelled");
        }
    }

    /// Delete the note awaiting confirmation.
    ///
    /// The confirmation stays open with its pending id if the request
    /// fails, so the user can retry or cancel.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let id = self
            .state
            .pending_delete_id()
            .cloned()
            .ok_or_else(|| Error::InvalidInput("no deletion awaits confirmation".to_string()))?;

        if let Err(e) = self.store.delete_note(&id).await {
            self.fail(Operation::Delete, &e);
            return Err(e);
        }

        info!(subsystem = "view", note_id = %id, "Note deleted");
        self.state.modal = Modal::Closed;
        self.state.status = Status::Info {
            message: "Note deleted".to_string(),
        };
        let _ = self.refresh().await;
        Ok(())
    }

    fn fail(&mut self, operation: Operation, error: &Error) {
        warn!(subsystem = "view", op = %operation, error = %error, "Operation failed");
        self.state.status = Status::Error {
            operation,
            message: error.to_string(),
        };
    }
}
