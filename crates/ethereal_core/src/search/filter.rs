//! Category and query filtering.
//!
//! # Responsibility
//! - Reduce the full collection to the subset a view asks for.
//!
//! # Invariants
//! - Filtering preserves stored order and never re-sorts.
//! - `Stats` is a view-mode switch, not a data filter: it passes everything
//!   through and is gated by `stats_available`.

use crate::model::settings::UserSettings;
use crate::model::thought::Thought;

/// Mood value that marks an entry as inspiration on its own.
const INSPIRED_MOOD: &str = "Inspired";

/// Tag fragments that mark an entry as inspiration. Both markers survive
/// from data written by earlier localized builds.
const INSPIRATION_TAG_MARKERS: [&str; 2] = ["灵感", "idea"];

/// Category tabs offered by the library view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterCategory {
    #[default]
    All,
    Favorites,
    Inspired,
    /// Mood trends view; passes all data through for aggregation.
    Stats,
}

impl FilterCategory {
    /// Stable view identifier used by the UI layer.
    pub fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Favorites => "fav",
            Self::Inspired => "inspire",
            Self::Stats => "stats",
        }
    }

    pub fn from_id(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "fav" => Some(Self::Favorites),
            "inspire" => Some(Self::Inspired),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

/// Returns the subset matching the category predicate and, when the query is
/// non-empty, a case-insensitive substring match on content, tags, or mood.
pub fn filter_thoughts(thoughts: &[Thought], query: &str, category: FilterCategory) -> Vec<Thought> {
    let query = query.to_lowercase();
    thoughts
        .iter()
        .filter(|thought| matches_category(thought, category))
        .filter(|thought| query.is_empty() || matches_query(thought, &query))
        .cloned()
        .collect()
}

/// The trends view is offered only when enrichment and trend display are
/// both enabled.
pub fn stats_available(settings: &UserSettings) -> bool {
    settings.is_ai_enabled && settings.show_mood_trends
}

/// Falls back to `All` when the stats view is requested but not available.
pub fn effective_category(requested: FilterCategory, settings: &UserSettings) -> FilterCategory {
    if requested == FilterCategory::Stats && !stats_available(settings) {
        FilterCategory::All
    } else {
        requested
    }
}

fn matches_category(thought: &Thought, category: FilterCategory) -> bool {
    match category {
        FilterCategory::All | FilterCategory::Stats => true,
        FilterCategory::Favorites => thought.is_favorite,
        FilterCategory::Inspired => {
            thought.mood.as_deref() == Some(INSPIRED_MOOD)
                || thought.tags.iter().any(|tag| {
                    INSPIRATION_TAG_MARKERS
                        .iter()
                        .any(|marker| tag.contains(marker))
                })
        }
    }
}

fn matches_query(thought: &Thought, query: &str) -> bool {
    if thought.content.to_lowercase().contains(query) {
        return true;
    }
    if thought
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(query))
    {
        return true;
    }
    thought
        .mood
        .as_deref()
        .map_or(false, |mood| mood.to_lowercase().contains(query))
}
