//! Plain-text rendering of the note list and view state.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::{Display, Write};

use simplenotes_core::Note;
use simplenotes_view::{marker_for, Modal, NoteListView, Status, ViewState};

pub const EMPTY_HEADING: &str = "No Notes";
pub const EMPTY_HINT: &str = "Add your first note with the \"add\" command";
pub const DELETE_QUESTION: &str = "Are you sure you want to delete this note?";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the derived list, or the placeholder when it is empty.
pub fn render_list<Tz>(view: &NoteListView<'_>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match view {
        NoteListView::Empty => format!("{}\n  {}\n", EMPTY_HEADING, EMPTY_HINT),
        NoteListView::Notes(notes) => {
            let mut out = String::new();
            for note in notes {
                out.push_str(&render_note(note, tz));
                out.push('\n');
            }
            out
        }
    }
}

/// One note card: title with id, content, then tag and local date.
pub fn render_note<Tz>(note: &Note, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", note.id, note.title);
    for line in note.content.lines() {
        let _ = writeln!(out, "    {}", line);
    }

    let marker = marker_for(&note.tag);
    let tag = if marker.is_none() {
        note.tag.to_string()
    } else {
        format!("{} {}", marker.glyph(), note.tag)
    };
    let _ = writeln!(out, "    {}  {}", tag, format_date(note.date.as_ref(), tz));
    out
}

pub fn format_date<Tz>(date: Option<&DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match date {
        Some(date) => date.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => "(no date)".to_string(),
    }
}

/// Status banner, if there is one.
pub fn render_status(status: &Status) -> Option<String> {
    match status {
        Status::Ready => None,
        Status::Info { .. } => Some(status.to_string()),
        Status::Error { .. } => Some(format!("Error: {}", status)),
    }
}

/// What the open dialog is waiting for.
pub fn render_modal(state: &ViewState) -> Option<String> {
    match &state.modal {
        Modal::Closed => None,
        Modal::Composing => {
            let draft = &state.draft;
            Some(format!(
                "New note  title: {:?}  content: {:?}  tag: {}\n  (title/content/tag to edit, confirm to save, cancel to discard)",
                draft.title, draft.content, draft.tag
            ))
        }
        Modal::ConfirmingDelete { note_id } => Some(format!(
            "{} [{}]\n  (confirm or cancel)",
            DELETE_QUESTION, note_id
        )),
    }
}

/// Header line summarizing search, filter and ordering.
pub fn render_header(state: &ViewState, shown: usize, total: usize) -> String {
    let mut header = format!("{} ({} of {})", state.active_tag.label(), shown, total);
    if !state.search_text.is_empty() {
        let _ = write!(header, "  search: {:?}", state.search_text);
    }
    header
}
