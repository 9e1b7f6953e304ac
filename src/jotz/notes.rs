//! # Note Store
//!
//! [`NoteStore`] is the sole owner of the note collection. Every mutation goes
//! through it, and every successful mutation is written through the
//! persistence adapter before the method returns.
//!
//! ## Ordering contract
//!
//! - New notes are inserted at the **head** of the collection (position 0),
//!   so the collection reads most-recent-first until the user reorders it.
//! - [`NoteStore::reorder`] uses list-splice semantics: the note is removed at
//!   `from`, then inserted at `to` in the *post-removal* index space.
//!   On `[A, B, C]`, `reorder(0, 2)` yields `[B, C, A]`.
//!
//! ## Failure contract
//!
//! Rejected operations (validation, unknown id, bad index) return an error and
//! leave the collection untouched, with no write. A failed *write* is logged and
//! swallowed: the in-memory collection stays authoritative and the operation
//! still reports success.
//!
//! ## Change notification
//!
//! Subscribers registered with [`NoteStore::subscribe`] receive a
//! [`StoreEvent`] after each successful mutation and after a load. No-ops and
//! rejected operations emit nothing.

use crate::error::{JotzError, Result};
use crate::model::{normalize_text, Note, NoteId, Presentation};
use crate::store::records::{decode_notes, encode_notes};
use crate::store::{PersistenceAdapter, NOTES_KEY};
use chrono::Utc;
use log::{debug, info, warn};
use std::cell::Cell;

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Loaded { count: usize },
    Added(NoteId),
    Deleted(NoteId),
    Edited(NoteId),
    Reordered { from: usize, to: usize },
    PinToggled { id: NoteId, pinned: bool },
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

pub struct NoteStore<A: PersistenceAdapter> {
    adapter: A,
    notes: Vec<Note>,
    listeners: Vec<Listener>,
    // Set when the last write failed, so memory is ahead of storage
    dirty: Cell<bool>,
}

impl<A: PersistenceAdapter> NoteStore<A> {
    /// An empty store over `adapter`. Nothing is read until
    /// [`load_from_persistence`](Self::load_from_persistence) is called.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            notes: Vec::new(),
            listeners: Vec::new(),
            dirty: Cell::new(false),
        }
    }

    /// A store populated from whatever `adapter` holds.
    pub fn load(adapter: A) -> Self {
        let mut store = Self::new(adapter);
        store.load_from_persistence();
        store
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id() == id)
    }

    /// Current collection position of the note with `id`.
    pub fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id() == id)
    }

    /// Registers a listener called after every successful change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_note(&mut self, text: &str, presentation: Option<Presentation>) -> Result<NoteId> {
        let note = Note::create(text, presentation)?;
        let id = note.id();
        self.notes.insert(0, note);
        self.commit(StoreEvent::Added(id));
        Ok(id)
    }

    pub fn delete_note(&mut self, id: NoteId) -> Result<()> {
        let pos = self.require_position(id)?;
        self.notes.remove(pos);
        self.commit(StoreEvent::Deleted(id));
        Ok(())
    }

    /// Replaces the text of a note, stamping `updated_at`.
    ///
    /// Blank text is rejected before the id is looked up.
    pub fn edit_note(&mut self, id: NoteId, new_text: &str) -> Result<()> {
        let text = normalize_text(new_text)?;
        let pos = self.require_position(id)?;
        self.notes[pos] = self.notes[pos].with_text(text, Utc::now());
        self.commit(StoreEvent::Edited(id));
        Ok(())
    }

    /// Moves the note at `from` so that it ends up at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.notes.len();
        for index in [from, to] {
            if index >= len {
                return Err(JotzError::OutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }

        let note = self.notes.remove(from);
        self.notes.insert(to, note);
        self.commit(StoreEvent::Reordered { from, to });
        Ok(())
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> Result<()> {
        let pos = self.require_position(id)?;
        let pinned = !self.notes[pos].is_pinned();
        self.notes[pos] = self.notes[pos].with_pinned(pinned);
        self.commit(StoreEvent::PinToggled { id, pinned });
        Ok(())
    }

    /// Replaces the collection with what the adapter holds.
    ///
    /// Never fails: an unreadable or corrupt blob yields an empty collection.
    pub fn load_from_persistence(&mut self) {
        self.notes = match self.adapter.read(NOTES_KEY) {
            Ok(Some(blob)) => {
                let (notes, report) = decode_notes(&blob);
                if !report.dropped.is_empty() {
                    warn!(
                        "Skipped {} unreadable stored note(s)",
                        report.dropped.len()
                    );
                }
                info!(
                    "Loaded {} note(s) ({} repaired)",
                    notes.len(),
                    report.repaired
                );
                notes
            }
            Ok(None) => {
                debug!("No stored notes yet");
                Vec::new()
            }
            Err(e) => {
                warn!("Could not read stored notes, starting empty: {}", e);
                Vec::new()
            }
        };
        let count = self.notes.len();
        self.notify(&StoreEvent::Loaded { count });
    }

    /// True when the last write failed and storage lags behind memory.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.get()
    }

    /// Retries the write if storage is behind. Used at shutdown.
    pub fn flush(&self) {
        if self.dirty.get() {
            self.persist();
        }
    }

    fn require_position(&self, id: NoteId) -> Result<usize> {
        self.position(id).ok_or(JotzError::NotFound(id))
    }

    fn commit(&mut self, event: StoreEvent) {
        self.persist();
        self.notify(&event);
    }

    fn persist(&self) {
        let result = encode_notes(&self.notes).and_then(|blob| self.adapter.write(NOTES_KEY, &blob));
        match result {
            Ok(()) => {
                self.dirty.set(false);
                debug!("Saved {} note(s)", self.notes.len());
            }
            Err(e) => {
                self.dirty.set(true);
                warn!("Failed to save notes, changes kept in memory: {}", e);
            }
        }
    }

    fn notify(&mut self, event: &StoreEvent) {
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::store::memory::fixtures::{color, StoreFixture};
    use crate::store::memory::MemAdapter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn texts<A: PersistenceAdapter>(store: &NoteStore<A>) -> Vec<&str> {
        store.notes().iter().map(|n| n.text()).collect()
    }

    #[test]
    fn add_grows_by_one_and_is_retrievable() {
        let mut store = NoteStore::new(MemAdapter::new());
        let id = store.add_note("buy milk", color("#fff475")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id).unwrap().text(), "buy milk");
        assert_eq!(store.adapter().write_count(), 1);
    }

    #[test]
    fn new_notes_go_to_the_head() {
        let fixture = StoreFixture::new().with_note("first").with_note("second");
        assert_eq!(fixture.texts(), vec!["second", "first"]);
        assert_eq!(fixture.store.position(fixture.ids[1]), Some(0));
    }

    #[test]
    fn add_rejects_blank_text_without_writing() {
        let mut fixture = StoreFixture::new().with_note("keep");
        let before = fixture.store.notes().to_vec();
        let writes = fixture.store.adapter().write_count();

        for text in ["", "   "] {
            let err = fixture.store.add_note(text, color("#fff")).unwrap_err();
            assert_eq!(err.validation(), Some(ValidationError::EmptyText));
        }
        let err = fixture.store.add_note("text", None).unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::MissingPresentation));

        assert_eq!(fixture.store.notes(), &before[..]);
        assert_eq!(fixture.store.adapter().write_count(), writes);
    }

    #[test]
    fn unknown_ids_are_not_found_and_change_nothing() {
        let mut fixture = StoreFixture::new().with_notes(&["a", "b"]);
        let before = fixture.store.notes().to_vec();
        let writes = fixture.store.adapter().write_count();
        let ghost = NoteId::new();

        assert!(matches!(fixture.store.delete_note(ghost), Err(JotzError::NotFound(id)) if id == ghost));
        assert!(matches!(fixture.store.edit_note(ghost, "x"), Err(JotzError::NotFound(_))));
        assert!(matches!(fixture.store.toggle_pin(ghost), Err(JotzError::NotFound(_))));

        assert_eq!(fixture.store.notes(), &before[..]);
        assert_eq!(fixture.store.adapter().write_count(), writes);
    }

    #[test]
    fn delete_removes_only_the_target() {
        let mut fixture = StoreFixture::new().with_notes(&["a", "b", "c"]);
        fixture.store.delete_note(fixture.ids[1]).unwrap();

        assert_eq!(texts(&fixture.store), vec!["a", "c"]);
        assert!(fixture.store.get(fixture.ids[1]).is_none());
    }

    #[test]
    fn edit_replaces_text_and_preserves_the_rest() {
        let mut fixture = StoreFixture::new().with_pinned_note("old");
        let id = fixture.ids[0];
        let original = fixture.store.get(id).unwrap().clone();

        fixture.store.edit_note(id, "  new  ").unwrap();
        let edited = fixture.store.get(id).unwrap();

        assert_eq!(edited.text(), "new");
        assert!(edited.updated_at().is_some());
        assert!(edited.updated_at().unwrap() >= edited.created_at());
        assert_eq!(edited.created_at(), original.created_at());
        assert_eq!(edited.presentation(), original.presentation());
        assert!(edited.is_pinned());
    }

    #[test]
    fn edit_with_blank_text_is_rejected_before_lookup() {
        let mut fixture = StoreFixture::new().with_note("keep");
        let err = fixture.store.edit_note(NoteId::new(), "  ").unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::EmptyText));

        let err = fixture.store.edit_note(fixture.ids[0], "").unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::EmptyText));
        assert_eq!(fixture.texts(), vec!["keep"]);
    }

    #[test]
    fn reorder_uses_splice_semantics() {
        let mut fixture = StoreFixture::new().with_notes(&["A", "B", "C"]);
        fixture.store.reorder(0, 2).unwrap();
        assert_eq!(fixture.texts(), vec!["B", "C", "A"]);

        fixture.store.reorder(2, 0).unwrap();
        assert_eq!(fixture.texts(), vec!["A", "B", "C"]);

        fixture.store.reorder(0, 1).unwrap();
        assert_eq!(fixture.texts(), vec!["B", "A", "C"]);
    }

    #[test]
    fn reorder_to_same_index_is_a_silent_no_op() {
        let mut fixture = StoreFixture::new().with_notes(&["A", "B", "C"]);
        let before = fixture.store.notes().to_vec();
        let writes = fixture.store.adapter().write_count();

        for i in 0..3 {
            fixture.store.reorder(i, i).unwrap();
        }

        assert_eq!(fixture.store.notes(), &before[..]);
        assert_eq!(fixture.store.adapter().write_count(), writes);
    }

    #[test]
    fn reorder_rejects_out_of_range_indexes() {
        let mut fixture = StoreFixture::new().with_notes(&["A", "B"]);
        let writes = fixture.store.adapter().write_count();

        assert!(matches!(
            fixture.store.reorder(2, 0),
            Err(JotzError::OutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            fixture.store.reorder(0, 5),
            Err(JotzError::OutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            fixture.store.reorder(3, 3),
            Err(JotzError::OutOfRange { .. })
        ));
        assert_eq!(fixture.texts(), vec!["A", "B"]);
        assert_eq!(fixture.store.adapter().write_count(), writes);
    }

    #[test]
    fn reorder_on_empty_store_is_out_of_range() {
        let mut store = NoteStore::new(MemAdapter::new());
        assert!(matches!(
            store.reorder(0, 0),
            Err(JotzError::OutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn toggle_pin_is_involutive() {
        let mut fixture = StoreFixture::new().with_note("a");
        let id = fixture.ids[0];

        fixture.store.toggle_pin(id).unwrap();
        assert!(fixture.store.get(id).unwrap().is_pinned());
        fixture.store.toggle_pin(id).unwrap();
        assert!(!fixture.store.get(id).unwrap().is_pinned());
        assert_eq!(fixture.store.position(id), Some(0));
    }

    #[test]
    fn every_successful_mutation_writes_once() {
        let mut fixture = StoreFixture::new().with_notes(&["a", "b"]);
        let base = fixture.store.adapter().write_count();

        fixture.store.edit_note(fixture.ids[0], "a2").unwrap();
        fixture.store.toggle_pin(fixture.ids[0]).unwrap();
        fixture.store.reorder(0, 1).unwrap();
        fixture.store.delete_note(fixture.ids[1]).unwrap();

        assert_eq!(fixture.store.adapter().write_count(), base + 4);
    }

    #[test]
    fn write_failures_keep_the_in_memory_change() {
        let adapter = MemAdapter::new();
        let mut store = NoteStore::new(&adapter);
        adapter.set_simulate_write_error(true);

        let id = store.add_note("survives", color("#fff")).unwrap();
        assert_eq!(store.get(id).unwrap().text(), "survives");
        assert_eq!(adapter.blob(NOTES_KEY), None);
        assert!(store.has_unsaved_changes());

        adapter.set_simulate_write_error(false);
        store.flush();
        assert!(adapter.blob(NOTES_KEY).unwrap().contains("survives"));
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn flush_without_pending_changes_does_not_write() {
        let adapter = MemAdapter::new().with_blob(NOTES_KEY, "{corrupt");
        let store = NoteStore::load(&adapter);
        store.flush();

        assert_eq!(adapter.write_count(), 0);
        assert_eq!(adapter.blob(NOTES_KEY).as_deref(), Some("{corrupt"));
    }

    #[test]
    fn state_survives_a_reload() {
        let adapter = MemAdapter::new();
        let (a, b) = {
            let mut store = NoteStore::new(&adapter);
            let a = store.add_note("a", color("#fff")).unwrap();
            let b = store.add_note("b", color("#000")).unwrap();
            store.toggle_pin(a).unwrap();
            store.edit_note(b, "b2").unwrap();
            (a, b)
        };

        let reloaded = NoteStore::load(&adapter);
        assert_eq!(texts(&reloaded), vec!["b2", "a"]);
        assert!(reloaded.get(a).unwrap().is_pinned());
        assert!(reloaded.get(b).unwrap().updated_at().is_some());
    }

    #[test]
    fn corrupt_or_unreadable_state_loads_empty() {
        let store = NoteStore::load(MemAdapter::new().with_blob(NOTES_KEY, "{oops"));
        assert!(store.is_empty());

        let store = NoteStore::load(MemAdapter::new().with_blob(NOTES_KEY, "{\"a\": 1}"));
        assert!(store.is_empty());

        let adapter = MemAdapter::new().with_blob(NOTES_KEY, "[]");
        adapter.set_simulate_read_error(true);
        let store = NoteStore::load(&adapter);
        assert!(store.is_empty());
    }

    #[test]
    fn load_does_not_write() {
        let adapter = MemAdapter::new().with_blob(NOTES_KEY, "[]");
        let _store = NoteStore::load(&adapter);
        assert_eq!(adapter.write_count(), 0);
    }

    #[test]
    fn subscribers_see_only_successful_changes() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = NoteStore::new(MemAdapter::new());
        let sink = Rc::clone(&events);
        store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let a = store.add_note("a", color("#fff")).unwrap();
        let _ = store.add_note(" ", color("#fff"));
        let b = store.add_note("b", color("#fff")).unwrap();
        store.reorder(1, 1).unwrap();
        store.reorder(0, 1).unwrap();
        store.toggle_pin(a).unwrap();
        store.edit_note(b, "b2").unwrap();
        let _ = store.delete_note(NoteId::new());
        store.delete_note(a).unwrap();
        store.load_from_persistence();

        assert_eq!(
            *events.borrow(),
            vec![
                StoreEvent::Added(a),
                StoreEvent::Added(b),
                StoreEvent::Reordered { from: 0, to: 1 },
                StoreEvent::PinToggled { id: a, pinned: true },
                StoreEvent::Edited(b),
                StoreEvent::Deleted(a),
                StoreEvent::Loaded { count: 1 },
            ]
        );
    }
}
