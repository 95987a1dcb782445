//! In-memory note store for deterministic testing.
//!
//! Behaves like the reference server: ids are sequential integers, the list
//! comes back in insertion order and the created record is echoed back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use simplenotes_client::mock::{MockNoteStore, MockOperation};
//!
//! let store = MockNoteStore::new().fail_next(MockOperation::Delete, 1);
//! assert!(store.calls().is_empty());
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use simplenotes_core::{Error, NewNote, Note, NoteId, NoteStore, Result};

/// Store operation, used to script failures and inspect the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    List,
    Create,
    Delete,
}

/// A recorded call against the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub operation: MockOperation,
    pub note_id: Option<NoteId>,
}

#[derive(Debug, Default)]
struct MockState {
    notes: Vec<Note>,
    next_id: i64,
    failures: HashMap<MockOperation, u32>,
    calls: Vec<MockCall>,
    reachable: bool,
}

/// Mock note store for testing. Clones share the same state.
#[derive(Clone)]
pub struct MockNoteStore {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockNoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNoteStore {
    /// Create an empty, reachable store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_id: 1,
                reachable: true,
                ..MockState::default()
            })),
        }
    }

    /// Seed the collection. Later ids continue after the largest numeric id.
    pub fn with_notes(self, notes: Vec<Note>) -> Self {
        {
            let mut state = self.lock();
            let max_id = notes
                .iter()
                .filter_map(|n| match n.id {
                    NoteId::Number(id) => Some(id),
                    NoteId::Text(_) => None,
                })
                .max()
                .unwrap_or(0);
            state.next_id = state.next_id.max(max_id + 1);
            state.notes = notes;
        }
        self
    }

    /// Make the next `times` calls of `operation` fail with a 503.
    pub fn fail_next(self, operation: MockOperation, times: u32) -> Self {
        self.lock().failures.insert(operation, times);
        self
    }

    /// Toggle what `health_check` reports.
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Snapshot of the stored notes.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Number of calls of one kind.
    pub fn call_count(&self, operation: MockOperation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock store mutex poisoned")
    }

    fn record(state: &mut MockState, operation: MockOperation, note_id: Option<NoteId>) -> Result<()> {
        state.calls.push(MockCall { operation, note_id });
        match state.failures.get_mut(&operation) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                Err(Error::Status {
                    status: 503,
                    message: format!("mock failure for {:?}", operation),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl NoteStore for MockNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, MockOperation::List, None)?;
        Ok(state.notes.clone())
    }

    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>> {
        let mut state = self.lock();
        Self::record(&mut state, MockOperation::Create, None)?;
        let id = NoteId::Number(state.next_id);
        state.next_id += 1;
        let saved = note.clone().into_note(id);
        state.notes.push(saved.clone());
        Ok(Some(saved))
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let mut state = self.lock();
        Self::record(&mut state, MockOperation::Delete, Some(id.clone()))?;
        // The reference server answers 200 for unknown ids as well.
        state.notes.retain(|n| &n.id != id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.lock().reachable
    }
}
