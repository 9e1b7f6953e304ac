use crate::model::NoteId;
use thiserror::Error;

/// Reasons a note's content is rejected at creation or edit time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Note text cannot be empty")]
    EmptyText,

    #[error("Note needs a color or gradient")]
    MissingPresentation,
}

#[derive(Error, Debug)]
pub enum JotzError {
    #[error("Invalid note: {0}")]
    Validation(#[from] ValidationError),

    #[error("Note not found: {0}")]
    NotFound(NoteId),

    #[error("Index {index} is out of range (collection has {len} notes)")]
    OutOfRange { index: usize, len: usize },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl JotzError {
    /// The validation failure behind this error, if any.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            JotzError::Validation(v) => Some(*v),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JotzError>;
