//! Visual marker shown next to a note's tag.

use simplenotes_core::NoteTag;

/// Marker drawn beside a tag. Every known tag has one; anything else gets
/// [`TagMarker::None`] and renders without a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagMarker {
    Briefcase,
    User,
    Lightbulb,
    Bell,
    None,
}

impl TagMarker {
    /// Terminal glyph for the marker, empty for [`TagMarker::None`].
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Briefcase => "💼",
            Self::User => "👤",
            Self::Lightbulb => "💡",
            Self::Bell => "🔔",
            Self::None => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Exhaustive over [`NoteTag`]: a new tag variant fails to compile here
/// until it is given a marker.
pub fn marker_for(tag: &NoteTag) -> TagMarker {
    match tag {
        NoteTag::Work => TagMarker::Briefcase,
        NoteTag::Personal => TagMarker::User,
        NoteTag::Ideas => TagMarker::Lightbulb,
        NoteTag::Reminders => TagMarker::Bell,
        NoteTag::Unrecognized(_) => TagMarker::None,
    }
}
