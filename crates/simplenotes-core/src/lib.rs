//! # simplenotes-core
//!
//! Core types, traits, and abstractions for the SimpleNotes client.
//!
//! This crate provides the data model, error type and store trait that the
//! client, view and CLI crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
