//! Key-value rows with local-storage semantics.
//!
//! # Responsibility
//! - Read and write whole JSON collections under fixed keys.
//!
//! # Invariants
//! - One collection is one row, so every write is atomic at collection
//!   granularity.
//! - Key suffixes are schema epochs: a schema change bumps the suffix and
//!   abandons the old key instead of migrating its data in place.

use super::DbResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Storage key for the thought collection.
pub const THOUGHTS_KEY: &str = "ethereal_notes_v2";
/// Storage key for the settings record. The v2 epoch replaced the plaintext
/// password field with a digest.
pub const SETTINGS_KEY: &str = "ethereal_settings_v2";

/// Reads one value. `None` when the key was never written.
pub fn kv_get(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?1;", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

/// Writes one value, replacing any previous one under the same key.
pub fn kv_set(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at)
         VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![key, value],
    )?;
    Ok(())
}
