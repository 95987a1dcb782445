//! # simplenotes-client
//!
//! Note store client for the SimpleNotes collection service.
//!
//! This crate provides:
//! - [`HttpNoteStore`], the reqwest implementation of [`NoteStore`] against
//!   `GET/POST /api/notes` and `DELETE /api/notes/{id}`
//! - [`ClientConfig`], loaded from `SIMPLENOTES_*` environment variables
//! - [`RetryPolicy`], a single retry for transient failures
//! - `MockNoteStore` (feature `mock`), an in-memory store for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use simplenotes_client::HttpNoteStore;
//! use simplenotes_core::NoteStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = HttpNoteStore::from_env().unwrap();
//!     let notes = store.list_notes().await.unwrap();
//!     println!("{} notes", notes.len());
//! }
//! ```

pub mod config;
pub mod http;
pub mod retry;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use simplenotes_core::*;

pub use config::ClientConfig;
pub use http::HttpNoteStore;
pub use retry::{Idempotency, RetryPolicy};
