//! # View Projection
//!
//! Derives what a UI shows from the collection and the search filter:
//!
//! 1. keep notes whose text contains the filter, case-insensitively
//!    (an empty filter keeps everything);
//! 2. yield pinned matches first, then unpinned matches.
//!
//! Step 2 is a stable two-bucket partition, not a sort: within each bucket the
//! notes keep their collection order, so manual reordering stays visible.
//!
//! [`project`] is lazy and cheap to restart: a [`Projection`] is a `Clone`
//! iterator that walks the borrowed collection twice (pinned pass, unpinned
//! pass) and never copies or mutates a note.

use crate::model::Note;

/// A note as displayed, together with its position in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayNote<'a> {
    pub position: usize,
    pub note: &'a Note,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Pinned,
    Unpinned,
    Done,
}

/// Lazy pinned-first view over a filtered collection.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    notes: &'a [Note],
    needle: String,
    pass: Pass,
    cursor: usize,
}

/// Projects `notes` through `filter`. See the module docs for the ordering.
pub fn project<'a>(notes: &'a [Note], filter: &str) -> Projection<'a> {
    Projection {
        notes,
        needle: filter.to_lowercase(),
        pass: Pass::Pinned,
        cursor: 0,
    }
}

impl<'a> Projection<'a> {
    /// Yields each projected note with its collection position.
    pub fn positioned(self) -> Positioned<'a> {
        Positioned { inner: self }
    }

    fn next_positioned(&mut self) -> Option<DisplayNote<'a>> {
        loop {
            let want_pinned = match self.pass {
                Pass::Pinned => true,
                Pass::Unpinned => false,
                Pass::Done => return None,
            };

            while self.cursor < self.notes.len() {
                let position = self.cursor;
                let note = &self.notes[position];
                self.cursor += 1;
                if note.is_pinned() == want_pinned && self.accepts(note) {
                    return Some(DisplayNote { position, note });
                }
            }

            self.cursor = 0;
            self.pass = match self.pass {
                Pass::Pinned => Pass::Unpinned,
                _ => Pass::Done,
            };
        }
    }

    fn accepts(&self, note: &Note) -> bool {
        self.needle.is_empty() || note.text().to_lowercase().contains(&self.needle)
    }
}

impl<'a> Iterator for Projection<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_positioned().map(|dn| dn.note)
    }
}

#[derive(Debug, Clone)]
pub struct Positioned<'a> {
    inner: Projection<'a>,
}

impl<'a> Iterator for Positioned<'a> {
    type Item = DisplayNote<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_positioned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Presentation;

    fn make_note(text: &str, pinned: bool) -> Note {
        Note::create(text, Some(Presentation::Color("#fff".into())))
            .unwrap()
            .with_pinned(pinned)
    }

    fn texts<'a>(it: impl Iterator<Item = &'a Note>) -> Vec<&'a str> {
        it.map(|n| n.text()).collect()
    }

    #[test]
    fn filters_out_non_matching_pinned_notes() {
        let notes = vec![
            make_note("milk", false),
            make_note("eggs", true),
            make_note("milk shake", false),
        ];
        assert_eq!(texts(project(&notes, "milk")), vec!["milk", "milk shake"]);
    }

    #[test]
    fn pinned_first_with_stable_buckets() {
        let notes = vec![
            make_note("a", false),
            make_note("b", true),
            make_note("c", false),
            make_note("d", true),
            make_note("e", false),
        ];
        assert_eq!(texts(project(&notes, "")), vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let notes = vec![make_note("Buy MILK", false), make_note("call mom", false)];
        assert_eq!(texts(project(&notes, "milk")), vec!["Buy MILK"]);
        assert_eq!(texts(project(&notes, "CALL")), vec!["call mom"]);
        assert!(project(&notes, "bread").next().is_none());
    }

    #[test]
    fn projection_is_restartable() {
        let notes = vec![make_note("x", false), make_note("y", true)];
        let view = project(&notes, "");
        let first: Vec<_> = texts(view.clone());
        let second: Vec<_> = texts(view);
        assert_eq!(first, second);
        assert_eq!(first, vec!["y", "x"]);
    }

    #[test]
    fn positioned_reports_collection_positions() {
        let notes = vec![
            make_note("one", false),
            make_note("two", false),
            make_note("three", true),
        ];
        let positions: Vec<usize> = project(&notes, "").positioned().map(|d| d.position).collect();
        assert_eq!(positions, vec![2, 0, 1]);

        let positions: Vec<usize> = project(&notes, "t").positioned().map(|d| d.position).collect();
        assert_eq!(positions, vec![2, 1]);
    }

    #[test]
    fn empty_collection_projects_nothing() {
        assert_eq!(project(&[], "").count(), 0);
    }
}
