//! # Note Record Codec
//!
//! Serializes the note collection to a JSON array of records and reads it
//! back. Encoding is strict; decoding is tolerant and never fails: every
//! stored record is either kept, repaired, or dropped by a fixed policy.
//!
//! ## Record shape
//!
//! ```json
//! {
//!   "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
//!   "text": "buy milk",
//!   "color": "#fff475",
//!   "pinned": false,
//!   "createdAt": "2024-05-01T10:00:00Z",
//!   "updatedAt": "2024-05-02T08:30:00Z"
//! }
//! ```
//!
//! `gradient` takes the place of `color` for gradient notes. `updatedAt` is
//! omitted until the first edit.
//!
//! ## Load policy
//!
//! | Condition | Outcome |
//! |---|---|
//! | blob is not JSON, or not an array | empty collection |
//! | record is not an object / field has the wrong type | dropped |
//! | `text` missing or blank | dropped |
//! | neither `color` nor `gradient` usable | dropped |
//! | `id`, `createdAt` or `updatedAt` present but unparseable | dropped |
//! | `id` repeats an earlier record's id | dropped |
//! | `id` missing | repaired with a fresh id |
//! | `createdAt` missing | repaired with the load time |
//! | `pinned` missing | defaults to `false` |
//! | both `color` and `gradient` present | gradient wins |
//!
//! Older data written before notes carried ids or timestamps therefore still
//! loads.

use crate::error::{JotzError, Result};
use crate::model::{Note, NoteId, Presentation};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NoteRecord<'a> {
    id: NoteId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gradient: Option<&'a str>,
    pinned: bool,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Note> for NoteRecord<'a> {
    fn from(note: &'a Note) -> Self {
        let (color, gradient) = match note.presentation() {
            Presentation::Color(c) => (Some(c.as_str()), None),
            Presentation::Gradient(g) => (None, Some(g.as_str())),
        };
        NoteRecord {
            id: note.id(),
            text: note.text(),
            color,
            gradient,
            pinned: note.is_pinned(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
        }
    }
}

/// Lenient mirror of [`NoteRecord`] used on the way in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    gradient: Option<String>,
    #[serde(default)]
    pinned: Option<bool>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

/// What happened to each stored record during [`decode_notes`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Records loaded as stored.
    pub kept: usize,
    /// Records loaded after filling in a missing id or creation time.
    pub repaired: usize,
    /// Records discarded, with the reason for each.
    pub dropped: Vec<DroppedRecord>,
    /// True when the blob as a whole was unreadable (not JSON or not an array).
    pub unreadable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// Position of the record in the stored array.
    pub position: usize,
    pub reason: String,
}

/// Serializes the collection, in order, to a JSON array.
pub fn encode_notes(notes: &[Note]) -> Result<String> {
    let records: Vec<NoteRecord<'_>> = notes.iter().map(NoteRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(JotzError::Serialization)
}

/// Reads a collection back from a blob, applying the load policy above.
pub fn decode_notes(blob: &str) -> (Vec<Note>, LoadReport) {
    let mut report = LoadReport::default();

    let items = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!(
                "Stored notes are not a list (found {}), starting empty",
                value_kind(&other)
            );
            report.unreadable = true;
            return (Vec::new(), report);
        }
        Err(e) => {
            warn!("Stored notes are not valid JSON ({}), starting empty", e);
            report.unreadable = true;
            return (Vec::new(), report);
        }
    };

    let now = Utc::now();
    let mut seen = HashSet::new();
    let mut notes = Vec::with_capacity(items.len());

    for (position, item) in items.into_iter().enumerate() {
        match decode_record(item, now) {
            Ok((note, repaired)) => {
                if !seen.insert(note.id()) {
                    drop_record(&mut report, position, format!("duplicate id {}", note.id()));
                    continue;
                }
                if repaired {
                    report.repaired += 1;
                } else {
                    report.kept += 1;
                }
                notes.push(note);
            }
            Err(reason) => drop_record(&mut report, position, reason),
        }
    }

    (notes, report)
}

fn drop_record(report: &mut LoadReport, position: usize, reason: String) {
    warn!("Dropping stored note #{}: {}", position, reason);
    report.dropped.push(DroppedRecord { position, reason });
}

/// Decodes one record; the flag reports whether it needed repairs.
fn decode_record(item: Value, now: DateTime<Utc>) -> std::result::Result<(Note, bool), String> {
    if !item.is_object() {
        return Err(format!("expected an object, found {}", value_kind(&item)));
    }
    let raw: StoredRecord = serde_json::from_value(item).map_err(|e| e.to_string())?;
    let mut repaired = false;

    let text = raw
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "missing text".to_string())?
        .to_string();

    let presentation = match (non_blank(raw.gradient), non_blank(raw.color)) {
        (Some(g), _) => Presentation::Gradient(g),
        (None, Some(c)) => Presentation::Color(c),
        (None, None) => return Err("missing color or gradient".to_string()),
    };

    let id = match raw.id {
        Some(s) => s
            .parse::<NoteId>()
            .map_err(|_| format!("malformed id {:?}", s))?,
        None => {
            repaired = true;
            NoteId::new()
        }
    };

    let created_at = match raw.created_at {
        Some(s) => parse_timestamp(&s, "createdAt")?,
        None => {
            repaired = true;
            now
        }
    };

    let updated_at = raw
        .updated_at
        .map(|s| parse_timestamp(&s, "updatedAt"))
        .transpose()?;

    let note = Note::from_parts(
        id,
        text,
        presentation,
        raw.pinned.unwrap_or(false),
        created_at,
        updated_at,
    );
    Ok((note, repaired))
}

fn non_blank(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

fn parse_timestamp(raw: &str, field: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("malformed {} {:?}", field, raw))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
