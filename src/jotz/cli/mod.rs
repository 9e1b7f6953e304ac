//! # CLI Behavior
//!
//! This is **one possible UI client** for jotz, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Addressing Notes
//!
//! `jotz list` shows every note with its **position** in the collection
//! (1-based). Pinned notes are listed first, so positions in the listing may
//! not be sequential. All per-note commands (`edit`, `delete`, `pin`, `move`)
//! take those positions.
//!
//! ## Naked Execution (`jotz`)
//!
//! Running `jotz` with no arguments defaults to `jotz list`.
//!
//! ## Storage Location
//!
//! Notes live in `$JOTZ_HOME` when set, otherwise in the platform data
//! directory (e.g. `~/.local/share/jotz` on Linux).
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers that call the API
//! - `render`: Output formatting (list rows, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
