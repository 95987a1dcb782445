//! Centralized default constants for SimpleNotes.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own.

// =============================================================================
// SERVER
// =============================================================================

/// Default root URL of the note collection service.
pub const BASE_URL: &str = "https://simplenotes-production.up.railway.app";

/// Path of the note collection resource, relative to the base URL.
pub const NOTES_PATH: &str = "/api/notes";

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// Per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Timeout for the reachability probe in seconds.
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Retries for transient failures (one retry, two attempts total).
pub const MAX_RETRIES: u32 = 1;

/// Delay before a retry in milliseconds.
pub const RETRY_DELAY_MS: u64 = 250;

/// Requests slower than this are logged with `slow = true`.
pub const SLOW_REQUEST_MS: u64 = 2000;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable overriding [`BASE_URL`].
pub const ENV_BASE_URL: &str = "SIMPLENOTES_BASE_URL";

/// Environment variable overriding [`TIMEOUT_SECS`].
pub const ENV_TIMEOUT_SECS: &str = "SIMPLENOTES_TIMEOUT_SECS";

/// Environment variable overriding [`MAX_RETRIES`].
pub const ENV_MAX_RETRIES: &str = "SIMPLENOTES_MAX_RETRIES";

// =============================================================================
// DRAFTS
// =============================================================================

/// Tag preselected for a freshly opened draft.
pub const DRAFT_TAG: crate::models::NoteTag = crate::models::NoteTag::Ideas;
