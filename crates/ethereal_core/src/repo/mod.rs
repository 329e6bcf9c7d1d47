//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts over the key-value store.
//! - Isolate serialization and storage-key details from the service layer.
//!
//! # Invariants
//! - Read paths degrade to empty/default values on absent or unparsable
//!   stored data; they never fail the caller for bad content.
//! - Write paths persist whole collections in a single key overwrite.

pub mod settings_repo;
pub mod thought_repo;
