//! # API Facade
//!
//! [`NotesApi`] is the single entry point for UI clients. It owns the three
//! pieces of live state a notes UI needs and keeps them consistent:
//!
//! - the [`NoteStore`] (committed notes),
//! - the [`EditSession`] (at most one uncommitted draft),
//! - the current search filter.
//!
//! Cross-cutting rules live here rather than in the individual components:
//! deleting a note that is being edited cancels the edit, and the view is
//! always recomputed from the latest store state plus the filter.
//!
//! ## Lifecycle
//!
//! Build one `NotesApi` at startup with [`NotesApi::open`] (which loads
//! persisted state), hand it to the UI layer, and call [`NotesApi::close`] at
//! shutdown for a final flush.
//!
//! ## Generic Over PersistenceAdapter
//!
//! - Production: `NotesApi<FileAdapter>`
//! - Testing: `NotesApi<MemAdapter>`

use crate::error::{JotzError, Result};
use crate::model::{Note, NoteId, Presentation};
use crate::notes::{NoteStore, StoreEvent};
use crate::preferences::Preferences;
use crate::projection::{project, Projection};
use crate::session::{ActiveEdit, EditSession};
use crate::store::PersistenceAdapter;
use log::debug;

pub struct NotesApi<A: PersistenceAdapter> {
    store: NoteStore<A>,
    session: EditSession,
    search: String,
    preferences: Preferences,
}

impl<A: PersistenceAdapter> NotesApi<A> {
    /// Opens the notes held by `adapter`.
    pub fn open(adapter: A) -> Self {
        let store = NoteStore::load(adapter);
        let preferences = Preferences::load(store.adapter());
        Self {
            store,
            session: EditSession::new(),
            search: String::new(),
            preferences,
        }
    }

    pub fn store(&self) -> &NoteStore<A> {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.store.get(id)
    }

    /// Id of the note at collection `position` (0-based).
    pub fn id_at(&self, position: usize) -> Result<NoteId> {
        self.store
            .notes()
            .get(position)
            .map(Note::id)
            .ok_or(JotzError::OutOfRange {
                index: position,
                len: self.store.len(),
            })
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.store.subscribe(listener);
    }

    // --- Note operations ---

    pub fn add_note(&mut self, text: &str, presentation: Option<Presentation>) -> Result<NoteId> {
        self.store.add_note(text, presentation)
    }

    /// Deletes a note, cancelling the edit session if it targets that note.
    pub fn delete_note(&mut self, id: NoteId) -> Result<()> {
        self.store.delete_note(id)?;
        if self.session.cancel_if_targets(id) {
            debug!("Cancelled edit of deleted note {}", id);
        }
        Ok(())
    }

    pub fn edit_note(&mut self, id: NoteId, new_text: &str) -> Result<()> {
        self.store.edit_note(id, new_text)
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.store.reorder(from, to)
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> Result<()> {
        self.store.toggle_pin(id)
    }

    // --- Edit session ---

    pub fn editing(&self) -> Option<&ActiveEdit> {
        self.session.active()
    }

    pub fn start_editing(&mut self, id: NoteId) {
        self.session.start_editing(&self.store, id);
    }

    pub fn update_draft(&mut self, text: &str) {
        self.session.update_draft(text);
    }

    pub fn save_editing(&mut self) -> Result<()> {
        self.session.save_editing(&mut self.store)
    }

    pub fn cancel_editing(&mut self) {
        self.session.cancel_editing();
    }

    // --- View ---

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, filter: &str) {
        self.search = filter.to_string();
    }

    /// The display sequence: current notes through the current filter, pinned first.
    pub fn view(&self) -> Projection<'_> {
        project(self.store.notes(), &self.search)
    }

    // --- Preferences ---

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.preferences.dark_mode = dark_mode;
        self.preferences.save(self.store.adapter());
    }

    /// Final flush at shutdown. Any open draft is discarded.
    pub fn close(self) {
        if let Some(active) = self.session.active() {
            debug!("Discarding unsaved draft for note {}", active.target);
        }
        self.store.flush();
    }
}
