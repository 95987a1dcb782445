//! Core traits for SimpleNotes abstractions.
//!
//! The view controller talks to the remote collection only through
//! [`NoteStore`], which keeps it testable against an in-memory store.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewNote, Note, NoteId};

/// Remote note collection.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetch the full current collection, in the order the server returns it.
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Submit a new note.
    ///
    /// Returns the stored record when the server echoes it back. Callers must
    /// re-list to observe the collection change either way.
    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>>;

    /// Remove the note with the given id.
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Check whether the store is reachable. Never fails; an unreachable
    /// store reports `false`.
    async fn health_check(&self) -> bool;
}

#[async_trait]
impl<S: NoteStore + ?Sized> NoteStore for std::sync::Arc<S> {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        (**self).list_notes().await
    }

    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>> {
        (**self).create_note(note).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        (**self).delete_note(id).await
    }

    async fn health_check(&self) -> bool {
        (**self).health_check().await
    }
}
