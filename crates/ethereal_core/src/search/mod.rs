//! In-memory filtering over the thought collection.
//!
//! # Responsibility
//! - Expose the category and free-text query predicates behind the library
//!   view.
//! - Keep result shaping deterministic and order-preserving.

pub mod filter;
