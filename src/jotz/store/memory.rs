use super::PersistenceAdapter;
use crate::error::{JotzError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory adapter for tests and development.
/// Does NOT persist data.
///
/// Uses `RefCell`/`Cell` for interior mutability so the adapter can be shared
/// by reference between a store and the test that inspects it.
#[derive(Default)]
pub struct MemAdapter {
    blobs: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_read_error: Cell<bool>,
}

impl MemAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, bypassing the write counter.
    pub fn with_blob(self, key: &str, blob: &str) -> Self {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self
    }

    /// Number of successful writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Current raw blob for `key`, if any.
    pub fn blob(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }
}

impl PersistenceAdapter for MemAdapter {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(JotzError::Persistence("Simulated read error".to_string()));
        }
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(JotzError::Persistence("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{NoteId, Presentation};
    use crate::notes::NoteStore;

    pub fn color(token: &str) -> Option<Presentation> {
        Some(Presentation::Color(token.to_string()))
    }

    /// Builds a store over a fresh `MemAdapter`, adding notes in call order.
    ///
    /// Since new notes go to the head, the *last* added note ends up at
    /// position 0. Use [`StoreFixture::with_notes`] to get the listed order.
    pub struct StoreFixture {
        pub store: NoteStore<MemAdapter>,
        pub ids: Vec<NoteId>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: NoteStore::new(MemAdapter::new()),
                ids: Vec::new(),
            }
        }

        pub fn with_note(mut self, text: &str) -> Self {
            let id = self.store.add_note(text, color("#ffffff")).unwrap();
            self.ids.push(id);
            self
        }

        pub fn with_pinned_note(mut self, text: &str) -> Self {
            let id = self.store.add_note(text, color("#fff475")).unwrap();
            self.store.toggle_pin(id).unwrap();
            self.ids.push(id);
            self
        }

        /// Adds notes so that the collection reads in the given order, and
        /// `ids` lines up with the collection positions.
        pub fn with_notes(mut self, texts: &[&str]) -> Self {
            let mut ids = Vec::new();
            for text in texts.iter().rev() {
                ids.push(self.store.add_note(text, color("#ffffff")).unwrap());
            }
            ids.reverse();
            self.ids.extend(ids);
            self
        }

        pub fn texts(&self) -> Vec<String> {
            self.store
                .notes()
                .iter()
                .map(|n| n.text().to_string())
                .collect()
        }
    }
}
