//! Structured logging schema for SimpleNotes.
//!
//! Events across the client, the view controller and the CLI carry the same
//! keys: `subsystem` ("client", "view", "cli"), `component` ("http_store",
//! "controller", "shell"), `op`, `note_id`, `tag`, `attempt`,
//! `status_code`, `duration_ms`, `ticket` and `error`.
//!
//! Fields that are declared `Empty` on a span and filled in later through
//! `Span::record` are named by the constants below, so the declaration and
//! the record call cannot drift apart.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unrecoverable startup failure |
//! | WARN  | Failed store call, retry scheduled, stale response dropped |
//! | INFO  | Lifecycle events (startup), completed mutations |
//! | DEBUG | Request dispatch, state transitions, config choices |
//! | TRACE | Per-note iteration during derivation |

/// Note id assigned by the server, recorded once a create is echoed.
pub const NOTE_ID: &str = "note_id";

/// Number of notes returned by a list call.
pub const RESULT_COUNT: &str = "result_count";
