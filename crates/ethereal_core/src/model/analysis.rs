//! AI analysis result shape.
//!
//! # Responsibility
//! - Define the structured payload the enrichment call asks the model for.
//!
//! # Invariants
//! - `mood` is the one field every schema revision returns; older stored
//!   payloads carry nothing else, so callers must never assume the optional
//!   fields are populated.

use serde::{Deserialize, Serialize};

/// Structured insight returned by the analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Emotional tone of the entry. Required in every revision.
    pub mood: String,
    /// One-sentence summary. Current revision only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Up to three suggested keywords. Current revision only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Brief reflective perspective or follow-up question. Current revision only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<String>,
}
