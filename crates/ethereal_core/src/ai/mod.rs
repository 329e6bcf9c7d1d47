//! AI enrichment: generative-API transport and the analysis adapter.
//!
//! # Responsibility
//! - Keep the remote model behind one narrow seam (`GenerativeClient`).
//! - Degrade gracefully: enrichment failures never block a save.

pub mod client;
pub mod enrich;
