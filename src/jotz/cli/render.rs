use chrono::{DateTime, Utc};
use colored::Colorize;
use jotz::model::Note;
use jotz::projection::DisplayNote;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TIME_WIDTH: usize = 14;
const PIN_MARKER: &str = "⚲";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

/// Renders the list view. Positions are shown 1-based.
pub(super) fn render_note_list(
    notes: &[DisplayNote<'_>],
    preview_width: usize,
    dark: bool,
) -> String {
    let mut out = String::new();
    let mut last_was_pinned = false;

    for (i, dn) in notes.iter().enumerate() {
        let pinned = dn.note.is_pinned();
        if i > 0 && last_was_pinned && !pinned {
            out.push('\n');
        }
        last_was_pinned = pinned;

        let left_prefix = if pinned {
            format!("  {} ", PIN_MARKER)
        } else {
            "    ".to_string()
        };
        let idx_str = format!("{}. ", dn.position + 1);

        let text = single_line(dn.note.text());
        let text_display = truncate_to_width(&text, preview_width);
        let padding = preview_width.saturating_sub(text_display.width());

        let idx_colored = match (pinned, dark) {
            (true, true) => idx_str.bright_yellow(),
            (true, false) => idx_str.yellow(),
            (false, _) => idx_str.normal(),
        };
        let time = format_time_ago(last_touched(dn.note));

        out.push_str(&format!(
            "{}{}{}{}  {}\n",
            left_prefix,
            idx_colored,
            text_display,
            " ".repeat(padding),
            time.dimmed()
        ));
    }

    out
}

fn last_touched(note: &Note) -> DateTime<Utc> {
    note.updated_at().unwrap_or_else(|| note.created_at())
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotz::model::Presentation;
    use jotz::projection::project;

    fn note(text: &str) -> Note {
        Note::create(text, Some(Presentation::Color("#fff".into()))).unwrap()
    }

    #[test]
    fn truncates_long_text_with_ellipsis() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a very long note indeed", 8);
        assert_eq!(cut, "a very …");
        assert_eq!(cut.width(), 8);
    }

    #[test]
    fn truncation_respects_wide_characters() {
        let cut = truncate_to_width("日本語のメモ", 5);
        assert!(cut.width() <= 5);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn multi_line_notes_render_on_one_row() {
        assert_eq!(single_line("one\ntwo\r\nthree"), "one two  three");
    }

    #[test]
    fn list_shows_one_based_positions() {
        colored::control::set_override(false);
        let notes = vec![note("first"), note("second")];
        let rows: Vec<DisplayNote<'_>> = project(&notes, "").positioned().collect();

        let out = render_note_list(&rows, 20, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    1. first"));
        assert!(lines[1].starts_with("    2. second"));
    }
}
