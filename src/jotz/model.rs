use crate::error::{Result, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a note. Assigned once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(NoteId)
    }
}

/// How a note is painted. The store treats the token as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Presentation {
    Color(String),
    Gradient(String),
}

impl Presentation {
    pub fn token(&self) -> &str {
        match self {
            Presentation::Color(t) | Presentation::Gradient(t) => t,
        }
    }

    fn is_blank(&self) -> bool {
        self.token().trim().is_empty()
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Color(t) => write!(f, "color {}", t),
            Presentation::Gradient(t) => write!(f, "gradient {}", t),
        }
    }
}

/// A single note.
///
/// Notes are values: nothing mutates a note in place. Edits and pin flips
/// produce a new `Note` sharing the original's id, which the store swaps in
/// at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    text: String,
    presentation: Presentation,
    pinned: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Builds a fresh, unpinned note from raw user input.
    ///
    /// The text is trimmed before validation, so `"  hi "` is stored as `"hi"`.
    pub fn create(text: &str, presentation: Option<Presentation>) -> Result<Note> {
        let text = normalize_text(text)?;
        let presentation = match presentation {
            Some(p) if !p.is_blank() => p,
            _ => return Err(ValidationError::MissingPresentation.into()),
        };

        Ok(Note {
            id: NoteId::new(),
            text,
            presentation,
            pinned: false,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Reassembles a note from already-validated parts (used by the record codec).
    pub(crate) fn from_parts(
        id: NoteId,
        text: String,
        presentation: Presentation,
        pinned: bool,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Note {
        Note {
            id,
            text,
            presentation,
            pinned,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// A copy of this note carrying new text, stamped as updated at `at`.
    pub(crate) fn with_text(&self, text: String, at: DateTime<Utc>) -> Note {
        Note {
            text,
            updated_at: Some(at),
            ..self.clone()
        }
    }

    pub(crate) fn with_pinned(&self, pinned: bool) -> Note {
        Note {
            pinned,
            ..self.clone()
        }
    }
}

/// Trims note text and rejects it when nothing is left.
pub fn normalize_text(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText.into());
    }
    Ok(trimmed.to_string())
}
