//! Thought domain model.
//!
//! # Responsibility
//! - Define the journal entry record and its creation helpers.
//! - Own the rules for merging AI analysis into an entry.
//!
//! # Invariants
//! - `id` is derived from creation time; uniqueness is best-effort and two
//!   entries created in the same millisecond are not guarded against.
//! - `created_at` is Unix epoch milliseconds and never changes after creation.
//! - Merging analysis never discards user-entered values.
//!
//! # See also
//! - `crate::model::analysis`

use crate::model::analysis::AnalysisResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Identifier for a thought: the creation epoch milliseconds as decimal text.
pub type ThoughtId = String;

/// Mood palette offered by the editor.
///
/// Analysis may return moods outside this list; they are stored verbatim.
pub const MOOD_PALETTE: [&str; 5] = ["Calm", "Happy", "Anxious", "Inspired", "Reflective"];

/// One journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    /// Creation-time identifier, see `ThoughtId`.
    pub id: ThoughtId,
    /// User-entered body text.
    pub content: String,
    /// Unix epoch milliseconds at creation.
    pub created_at: i64,
    /// Keywords in insertion order. User edits win over AI suggestions.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Emotional tone, usually one of `MOOD_PALETTE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// One-sentence AI summary of the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Reflective AI perspective or follow-up question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insight: Option<String>,
    /// Favorite flag. Absent in records written by older builds, read as `false`.
    #[serde(default)]
    pub is_favorite: bool,
}

impl Thought {
    /// Creates a new entry timestamped now.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_timestamp(content, Utc::now().timestamp_millis())
    }

    /// Creates a new entry with a caller-provided creation time.
    ///
    /// The identifier is derived from `created_at`, so two entries built from
    /// the same timestamp share an id.
    pub fn with_timestamp(content: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: created_at.to_string(),
            content: content.into(),
            created_at,
            tags: Vec::new(),
            mood: None,
            summary: None,
            ai_insight: None,
            is_favorite: false,
        }
    }

    /// Merges an analysis result into this entry.
    ///
    /// Rules:
    /// - `mood`, `summary` and `wisdom` refresh their fields when the result
    ///   carries a non-empty value; otherwise current values stay.
    /// - `tags` fill in only when the entry has none yet; user-entered tags
    ///   are never replaced.
    pub fn apply_analysis(&mut self, analysis: &AnalysisResult) {
        if !analysis.mood.is_empty() {
            self.mood = Some(analysis.mood.clone());
        }
        if let Some(summary) = &analysis.summary {
            self.summary = Some(summary.clone());
        }
        if let Some(wisdom) = &analysis.wisdom {
            self.ai_insight = Some(wisdom.clone());
        }
        if self.tags.is_empty() {
            if let Some(tags) = &analysis.tags {
                self.tags = tags.clone();
            }
        }
    }

    /// Flips the favorite flag.
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}
