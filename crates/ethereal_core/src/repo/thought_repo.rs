//! Thought repository contract and key-value implementation.
//!
//! # Responsibility
//! - Provide whole-collection CRUD over the persisted thought list.
//! - Keep storage-key and JSON details inside the persistence boundary.
//!
//! # Invariants
//! - `add` prepends: the collection stays most-recent-first.
//! - Mutations are read-all, map, write-all; id lookups on absent ids are
//!   silent no-ops.
//! - Absent or unparsable stored data reads as the empty collection.
//!
//! # See also
//! - `crate::db::kv`

use crate::db::kv::{kv_get, kv_set, THOUGHTS_KEY};
use crate::db::DbError;
use crate::model::thought::Thought;
use log::warn;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage transport failure.
    Db(DbError),
    /// A collection could not be encoded for storage.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the thought collection.
pub trait ThoughtRepository {
    /// Returns the full collection, most recent first.
    fn list(&self) -> RepoResult<Vec<Thought>>;
    /// Overwrites the full collection.
    fn replace_all(&self, thoughts: &[Thought]) -> RepoResult<()>;
    /// Inserts at the head of the collection.
    fn add(&self, thought: Thought) -> RepoResult<()>;
    /// Replaces every entry whose id matches.
    fn update(&self, thought: &Thought) -> RepoResult<()>;
    /// Removes every entry whose id matches. Absent ids are a no-op.
    fn delete(&self, id: &str) -> RepoResult<()>;
    /// Flips the favorite flag on the matching entry.
    fn toggle_favorite(&self, id: &str) -> RepoResult<()>;
}

/// Key-value backed thought repository.
pub struct KvThoughtRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvThoughtRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ThoughtRepository for KvThoughtRepository<'_> {
    fn list(&self) -> RepoResult<Vec<Thought>> {
        let raw = match kv_get(self.conn, THOUGHTS_KEY)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(thoughts) => Ok(thoughts),
            Err(err) => {
                warn!(
                    "event=thoughts_read module=repo status=degraded error=unparsable_collection detail={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn replace_all(&self, thoughts: &[Thought]) -> RepoResult<()> {
        let encoded = serde_json::to_string(thoughts).map_err(RepoError::Encode)?;
        kv_set(self.conn, THOUGHTS_KEY, &encoded)?;
        Ok(())
    }

    fn add(&self, thought: Thought) -> RepoResult<()> {
        let mut thoughts = self.list()?;
        thoughts.insert(0, thought);
        self.replace_all(&thoughts)
    }

    fn update(&self, updated: &Thought) -> RepoResult<()> {
        let mut thoughts = self.list()?;
        for thought in &mut thoughts {
            if thought.id == updated.id {
                *thought = updated.clone();
            }
        }
        self.replace_all(&thoughts)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut thoughts = self.list()?;
        thoughts.retain(|thought| thought.id != id);
        self.replace_all(&thoughts)
    }

    fn toggle_favorite(&self, id: &str) -> RepoResult<()> {
        let mut thoughts = self.list()?;
        for thought in &mut thoughts {
            if thought.id == id {
                thought.toggle_favorite();
            }
        }
        self.replace_all(&thoughts)
    }
}
