//! Domain records for the journaling core.
//!
//! # Responsibility
//! - Define the canonical shapes persisted as JSON: thoughts and settings.
//! - Define the AI analysis result and its merge-into-thought rules.
//!
//! # Invariants
//! - Wire field names are camelCase so persisted collections stay readable
//!   across editions of the app.
//! - Optional enrichment fields serialize only when present.

pub mod analysis;
pub mod settings;
pub mod thought;
