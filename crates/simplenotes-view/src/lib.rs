//! # simplenotes-view
//!
//! View state for the SimpleNotes client.
//!
//! - [`filter`]: pure derivation of the displayed list from the fetched
//!   collection, search text, tag filter and ordering
//! - [`state`]: the serializable [`ViewState`] record
//! - [`controller`]: [`NotesController`], which applies user actions to the
//!   state and drives a [`simplenotes_core::NoteStore`]
//! - [`tag_marker`]: marker shown next to each tag

pub mod controller;
pub mod filter;
pub mod state;
pub mod tag_marker;

pub use controller::{NotesController, RefreshOutcome, RefreshTicket};
pub use filter::{
    derive_visible, filter_by_search, filter_by_tag, matches_search, NoteListView, SortOrder,
    TagFilter,
};
pub use state::{Draft, Modal, Operation, Status, ViewState};
pub use tag_marker::{marker_for, TagMarker};
