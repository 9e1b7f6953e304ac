//! # Jotz Architecture
//!
//! Jotz is a **UI-agnostic sticky-note library**: an ordered collection of short
//! text notes that can be added, edited, deleted, searched, reordered and
//! pinned, persisted locally and restored on the next start. The bundled
//! command-line client is one UI over it; nothing below the API assumes a
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns store + edit session + search filter                │
//! │  - Keeps cross-component rules (delete cancels edit)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (notes.rs, session.rs, projection.rs, model.rs)       │
//! │  - Collection invariants, draft lifecycle, pinned-first view│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - PersistenceAdapter trait (key → blob)                    │
//! │  - FileAdapter (production), MemAdapter (testing)           │
//! │  - Record codec with a tolerant load policy                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - The in-memory collection is the source of truth. Every successful
//!   mutation is written through immediately; a failed write is logged and
//!   the change is kept.
//! - Rejected operations never change anything.
//! - Corrupt persisted state degrades to an empty collection, never a crash.
//! - The library logs through the `log` facade and never prints.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade UI clients talk to
//! - [`notes`]: The note store and its change events
//! - [`session`]: The edit session (draft state)
//! - [`projection`]: Search filter + pinned-first view
//! - [`model`]: `Note`, `NoteId`, `Presentation`
//! - [`store`]: Persistence adapters and the record codec
//! - [`preferences`]: Dark-mode preference
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod notes;
pub mod preferences;
pub mod projection;
pub mod session;
pub mod store;
