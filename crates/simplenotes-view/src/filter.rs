//! Derivation of the displayed note list.
//!
//! Everything here is a pure function of the fetched collection plus the
//! search text, tag filter and ordering mode, so it can be tested without a
//! store or a renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use simplenotes_core::{Error, Note, NoteTag, Result};

/// Tag selection in the filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TagFilter {
    #[default]
    All,
    Only(NoteTag),
}

impl TagFilter {
    /// Every option the dropdown offers, "all" first.
    pub fn options() -> Vec<TagFilter> {
        std::iter::once(TagFilter::All)
            .chain(NoteTag::KNOWN.into_iter().map(TagFilter::Only))
            .collect()
    }

    pub fn matches(&self, tag: &NoteTag) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.is_known() && wanted == tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All notes",
            Self::Only(tag) => tag.label(),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(tag) => f.write_str(tag.as_str()),
        }
    }
}

impl FromStr for TagFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<NoteTag>().map(Self::Only)
    }
}

impl TryFrom<String> for TagFilter {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TagFilter> for String {
    fn from(filter: TagFilter) -> Self {
        filter.to_string()
    }
}

/// How the filtered notes are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Server order reversed, so the most recently appended note comes first.
    #[default]
    FetchOrderReversed,
    /// Newest `date` first; notes without a date go last.
    DateDescending,
}

/// Result of deriving the displayed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListView<'a> {
    /// Nothing to show; rendered as the "no notes" placeholder.
    Empty,
    Notes(Vec<&'a Note>),
}

impl<'a> NoteListView<'a> {
    fn from_vec(notes: Vec<&'a Note>) -> Self {
        if notes.is_empty() {
            Self::Empty
        } else {
            Self::Notes(notes)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        self.notes().len()
    }

    pub fn notes(&self) -> &[&'a Note] {
        match self {
            Self::Empty => &[],
            Self::Notes(notes) => notes,
        }
    }
}

/// Case-insensitive substring match on title or content.
pub fn matches_search(note: &Note, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
}

/// Keep notes matching the search text; an empty search keeps everything.
pub fn filter_by_search<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    search_text: &str,
) -> Vec<&'a Note> {
    notes
        .into_iter()
        .filter(|n| matches_search(n, search_text))
        .collect()
}

/// Keep notes whose tag passes the filter.
pub fn filter_by_tag<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
    filter: &TagFilter,
) -> Vec<&'a Note> {
    notes.into_iter().filter(|n| filter.matches(&n.tag)).collect()
}

/// Search, then tag filter, then order.
pub fn derive_visible<'a>(
    notes: &'a [Note],
    search_text: &str,
    filter: &TagFilter,
    order: SortOrder,
) -> NoteListView<'a> {
    let searched = filter_by_search(notes, search_text);
    let mut visible = filter_by_tag(searched, filter);
    visible.reverse();

    if order == SortOrder::DateDescending {
        // stable: equal dates keep reverse fetch order
        visible.sort_by(|a, b| b.date.cmp(&a.date));
    }

    trace!(
        total = notes.len(),
        result_count = visible.len(),
        filter = %filter,
        "Derived visible notes"
    );
    NoteListView::from_vec(visible)
}
