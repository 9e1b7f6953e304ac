use crate::error::Result;
use crate::model::NoteId;
use crate::notes::NoteStore;
use crate::store::PersistenceAdapter;

/// The one in-progress edit, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEdit {
    pub target: NoteId,
    pub draft: String,
}

/// Draft state for editing a note, kept apart from committed data until saved.
///
/// Holds at most one [`ActiveEdit`]. Starting a new edit discards the previous
/// draft without saving it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditSession {
    active: Option<ActiveEdit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveEdit> {
        self.active.as_ref()
    }

    pub fn is_editing(&self, id: NoteId) -> bool {
        self.active.as_ref().is_some_and(|a| a.target == id)
    }

    /// Begins editing `id` with its current text as the draft.
    /// Unknown ids leave the session as it was.
    pub fn start_editing<A: PersistenceAdapter>(&mut self, store: &NoteStore<A>, id: NoteId) {
        if let Some(note) = store.get(id) {
            self.active = Some(ActiveEdit {
                target: id,
                draft: note.text().to_string(),
            });
        }
    }

    /// Replaces the draft. Does nothing when no edit is active.
    pub fn update_draft(&mut self, text: &str) {
        if let Some(active) = self.active.as_mut() {
            active.draft = text.to_string();
        }
    }

    /// Commits the draft to the store.
    ///
    /// On success the session ends. On failure (blank draft, note gone) the
    /// session and its draft stay put so the caller can retry or cancel.
    pub fn save_editing<A: PersistenceAdapter>(&mut self, store: &mut NoteStore<A>) -> Result<()> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        store.edit_note(active.target, &active.draft)?;
        self.active = None;
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.active = None;
    }

    /// Ends the session if it targets `id`. Returns whether it did.
    pub fn cancel_if_targets(&mut self, id: NoteId) -> bool {
        if self.is_editing(id) {
            self.active = None;
            return true;
        }
        false
    }
}
