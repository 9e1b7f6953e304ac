//! # Storage Layer
//!
//! jotz persists everything through the [`PersistenceAdapter`] trait: a tiny
//! key-value contract that reads and writes serialized blobs. The adapter knows
//! nothing about notes; the [`records`] codec turns the collection into a blob
//! and back, and [`crate::notes::NoteStore`] decides when to write.
//!
//! ## Implementations
//!
//! - [`fs::FileAdapter`]: Production storage, one JSON file per key
//!   ```text
//!   $JOTZ_HOME/
//!   ├── notes.json      # The note collection (JSON array)
//!   ├── darkMode.json   # Display preference (JSON bool)
//!   └── config.json     # Configuration (see crate::config)
//!   ```
//!
//! - [`memory::MemAdapter`]: In-memory storage for tests. Counts writes and can
//!   simulate write failures.
//!
//! ## Keys
//!
//! Two logical keys share the adapter: [`NOTES_KEY`] for the collection and
//! [`DARK_MODE_KEY`] for the display preference.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod records;

/// Key under which the serialized note collection lives.
pub const NOTES_KEY: &str = "notes";

/// Key under which the dark-mode display preference lives.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Abstract key-value storage for serialized blobs.
///
/// Methods take `&self`; in-memory implementations use interior mutability
/// since jotz is single-threaded.
pub trait PersistenceAdapter {
    /// Read the blob stored under `key`.
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// Implementations must not leave a half-written blob behind on failure.
    fn write(&self, key: &str, blob: &str) -> Result<()>;
}

impl<A: PersistenceAdapter + ?Sized> PersistenceAdapter for &A {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }
}
