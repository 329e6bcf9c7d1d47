//! Backup and journal rendering.
//!
//! # Responsibility
//! - Serialize the full thought collection to the pretty-printed JSON
//!   backup format, and read such backups back.
//! - Render the collection as a plain-text journal for printing.
//!
//! # Invariants
//! - A backup round-trips without loss: every field survives export and
//!   re-import, including absent optional enrichment.
//! - Rendering never fails; a timestamp outside the calendar range falls
//!   back to the raw millisecond value.

use crate::model::thought::Thought;
use chrono::{Local, LocalResult, TimeZone, Utc};
use std::error::Error;
use std::fmt;

/// Heading of the rendered plain-text journal.
pub const JOURNAL_TITLE: &str = "Ethereal Thoughts Journal";

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    /// The collection could not be serialized.
    Encode(serde_json::Error),
    /// The backup file is not a valid thought collection.
    Parse(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Encode(err) => write!(f, "failed to encode backup: {err}"),
            ExportError::Parse(err) => write!(f, "failed to parse backup: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::Encode(err) | ExportError::Parse(err) => Some(err),
        }
    }
}

/// Serializes the collection as the pretty-printed backup document.
pub fn thoughts_to_json(thoughts: &[Thought]) -> ExportResult<String> {
    serde_json::to_string_pretty(thoughts).map_err(ExportError::Encode)
}

/// Reads a backup document back into a collection.
pub fn thoughts_from_json(raw: &str) -> ExportResult<Vec<Thought>> {
    serde_json::from_str(raw).map_err(ExportError::Parse)
}

/// Renders the collection as a numbered plain-text journal, newest entry
/// first (collection order is preserved).
pub fn render_journal_text(thoughts: &[Thought]) -> String {
    let mut out = String::new();
    out.push_str(JOURNAL_TITLE);
    out.push('\n');
    for (index, thought) in thoughts.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. [{}] [Mood: {}]\n",
            index + 1,
            format_entry_timestamp(thought.created_at),
            thought.mood.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&thought.content);
        out.push('\n');
    }
    out
}

/// Local wall-clock rendering of an epoch-millisecond timestamp.
pub fn format_entry_timestamp(created_at: i64) -> String {
    match Utc.timestamp_millis_opt(created_at) {
        LocalResult::Single(instant) => instant
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        _ => created_at.to_string(),
    }
}

/// File name for a JSON backup taken at `now_ms`.
pub fn backup_file_name(now_ms: i64) -> String {
    format!("ethereal-backup-{now_ms}.json")
}

/// File name for a journal rendered at `now_ms`.
pub fn journal_file_name(now_ms: i64) -> String {
    format!("ethereal-journal-{now_ms}.txt")
}

#[cfg(test)]
mod tests {
    use super::{backup_file_name, format_entry_timestamp, journal_file_name, render_journal_text};
    use crate::model::thought::Thought;

    #[test]
    fn journal_numbers_entries_from_one() {
        let thoughts = vec![
            Thought::with_timestamp("first entry".to_string(), 1_700_000_000_000),
            Thought::with_timestamp("second entry".to_string(), 1_700_000_100_000),
        ];
        let text = render_journal_text(&thoughts);

        assert!(text.starts_with("Ethereal Thoughts Journal\n"));
        assert!(text.contains("\n1. ["));
        assert!(text.contains("\n2. ["));
        assert!(text.contains("first entry"));
        assert!(text.contains("second entry"));
    }

    #[test]
    fn missing_mood_renders_as_na() {
        let thoughts = vec![Thought::with_timestamp(
            "unlabeled".to_string(),
            1_700_000_000_000,
        )];
        assert!(render_journal_text(&thoughts).contains("[Mood: N/A]"));
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_millis() {
        assert_eq!(format_entry_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn file_names_carry_the_timestamp() {
        assert_eq!(
            backup_file_name(1_700_000_000_000),
            "ethereal-backup-1700000000000.json"
        );
        assert_eq!(
            journal_file_name(1_700_000_000_000),
            "ethereal-journal-1700000000000.txt"
        );
    }
}
