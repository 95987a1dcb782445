//! Explicit view-state record.
//!
//! Holds everything the interface shows besides the notes themselves. It is
//! plain data and serializes with serde, so a front end can snapshot it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use simplenotes_core::{NewNote, Note, NoteId, NoteTag, Result};

use crate::filter::{derive_visible, NoteListView, SortOrder, TagFilter};

/// Which dialog is open. At most one is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modal {
    #[default]
    Closed,
    /// The add-note form is open.
    Composing,
    /// The delete confirmation is open for `note_id`.
    ConfirmingDelete { note_id: NoteId },
}

/// In-progress add-note form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl Draft {
    /// Validate and stamp the draft with its submission time.
    pub fn to_new_note(&self, date: DateTime<Utc>) -> Result<NewNote> {
        NewNote::new(self.title.clone(), self.content.clone(), self.tag.clone(), date)
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Store operation a status refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Refresh,
    Create,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh => write!(f, "load notes"),
            Self::Create => write!(f, "save note"),
            Self::Delete => write!(f, "delete note"),
        }
    }
}

/// Outcome banner of the latest operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    #[default]
    Ready,
    Info { message: String },
    Error { operation: Operation, message: String },
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => Ok(()),
            Self::Info { message } => f.write_str(message),
            Self::Error { operation, message } => {
                write!(f, "Could not {}: {}", operation, message)
            }
        }
    }
}

/// Transient interface state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Free-text search; empty means no search filter.
    pub search_text: String,
    pub active_tag: TagFilter,
    pub sort_order: SortOrder,
    pub modal: Modal,
    pub draft: Draft,
    pub status: Status,
}

impl ViewState {
    /// Id of the note awaiting delete confirmation.
    pub fn pending_delete_id(&self) -> Option<&NoteId> {
        match &self.modal {
            Modal::ConfirmingDelete { note_id } => Some(note_id),
            _ => None,
        }
    }

    pub fn is_composing(&self) -> bool {
        self.modal == Modal::Composing
    }

    /// Derive what to display from `notes` under this state.
    pub fn visible<'a>(&self, notes: &'a [Note]) -> NoteListView<'a> {
        derive_visible(notes, &self.search_text, &self.active_tag, self.sort_order)
    }
}
