//! Settings repository contract and key-value implementation.
//!
//! # Responsibility
//! - Persist the singleton settings record.
//! - Fill defaults on every read so records written by older builds come
//!   back complete without migration logic.
//!
//! # Invariants
//! - `get` always returns a complete record.
//! - The merge is shallow: stored top-level keys win over defaults, unknown
//!   keys are ignored.
//! - Unparsable stored data degrades to pure defaults, never an error.

use crate::db::kv::{kv_get, kv_set, SETTINGS_KEY};
use crate::model::settings::UserSettings;
use crate::repo::thought_repo::{RepoError, RepoResult};
use log::warn;
use rusqlite::Connection;
use serde_json::Value;

/// Repository interface for the settings record.
pub trait SettingsRepository {
    /// Returns the stored record merged over defaults.
    fn get(&self) -> RepoResult<UserSettings>;
    /// Overwrites the full record.
    fn save(&self, settings: &UserSettings) -> RepoResult<()>;
}

/// Key-value backed settings repository.
pub struct KvSettingsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> KvSettingsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for KvSettingsRepository<'_> {
    fn get(&self) -> RepoResult<UserSettings> {
        match kv_get(self.conn, SETTINGS_KEY)? {
            Some(raw) => Ok(merge_with_defaults(&raw)),
            None => Ok(UserSettings::default()),
        }
    }

    fn save(&self, settings: &UserSettings) -> RepoResult<()> {
        let encoded = serde_json::to_string(settings).map_err(RepoError::Encode)?;
        kv_set(self.conn, SETTINGS_KEY, &encoded)?;
        Ok(())
    }
}

/// Shallow-merges a stored settings payload over the defaults.
///
/// Stored top-level keys win; keys the current build does not know are
/// ignored. Any payload that cannot be read as a settings object falls back
/// to pure defaults.
pub fn merge_with_defaults(raw: &str) -> UserSettings {
    let defaults = UserSettings::default();

    let stored = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            warn!("event=settings_read module=repo status=degraded error=unparsable_record");
            return defaults;
        }
    };

    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(map)) => map,
        // Defaults always serialize to an object; anything else means the
        // model shape changed underneath us.
        _ => return defaults,
    };
    for (key, value) in stored {
        merged.insert(key, value);
    }

    match serde_json::from_value(Value::Object(merged)) {
        Ok(settings) => settings,
        Err(err) => {
            warn!("event=settings_read module=repo status=degraded error=invalid_field detail={err}");
            defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::merge_with_defaults;
    use crate::model::settings::AiPersonality;

    #[test]
    fn merge_fills_missing_fields_from_defaults() {
        let settings = merge_with_defaults(r#"{"userId":"ada","isInitialized":true}"#);
        assert_eq!(settings.user_id, "ada");
        assert!(settings.is_initialized);
        assert!(settings.show_mood_trends);
        assert_eq!(settings.ai_personality, AiPersonality::Philosophical);
    }

    #[test]
    fn merge_ignores_unknown_keys() {
        let settings = merge_with_defaults(r#"{"userName":"Ada","legacyField":42}"#);
        assert_eq!(settings.user_name, "Ada");
    }

    #[test]
    fn merge_falls_back_to_defaults_on_garbage() {
        let settings = merge_with_defaults("not json at all");
        assert!(!settings.is_initialized);
        assert!(settings.user_id.is_empty());
    }

    #[test]
    fn merge_falls_back_to_defaults_on_non_object() {
        let settings = merge_with_defaults("[1,2,3]");
        assert!(!settings.is_initialized);
    }

    #[test]
    fn merge_falls_back_to_defaults_on_wrong_field_type() {
        let settings = merge_with_defaults(r#"{"isAiEnabled":"yes"}"#);
        assert!(!settings.is_ai_enabled);
    }
}
