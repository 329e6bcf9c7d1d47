//! User settings model.
//!
//! # Responsibility
//! - Define the singleton profile/preferences record and its defaults.
//!
//! # Invariants
//! - Exactly one settings record exists per store.
//! - The access password is persisted only as a SHA-256 digest, never as
//!   plaintext.
//! - Every field has a default so records written by older builds read back
//!   complete after the repository's merge step.
//!
//! # See also
//! - `crate::repo::settings_repo`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Voice used for enrichment system instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPersonality {
    /// Brief, gently philosophical reflections.
    #[default]
    Philosophical,
    /// Evocative, imagistic phrasing.
    Poetic,
    /// Short, plain observations.
    Concise,
}

/// Singleton profile and preferences record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Normalized account handle, lowercase `[a-z0-9_]` only.
    #[serde(default)]
    pub user_id: String,
    /// Display name chosen during setup.
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// SHA-256 hex digest of the access password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_digest: Option<String>,
    /// Portrait: either a seeded placeholder URL or an inline `data:` URL.
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
    /// False until first-run setup completes.
    #[serde(default)]
    pub is_initialized: bool,
    /// Master switch for the enrichment layer.
    #[serde(default)]
    pub is_ai_enabled: bool,
    #[serde(default)]
    pub ai_personality: AiPersonality,
    /// Offers the mood trends view when enabled together with AI.
    #[serde(default = "default_show_mood_trends")]
    pub show_mood_trends: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Proxy or regional endpoint override for the generative API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Model id override; the adapter falls back to its default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_model: Option<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            user_name: String::new(),
            email: None,
            password_digest: None,
            avatar_url: default_avatar_url(),
            is_initialized: false,
            is_ai_enabled: false,
            ai_personality: AiPersonality::default(),
            show_mood_trends: default_show_mood_trends(),
            api_key: None,
            api_base_url: None,
            custom_model: None,
        }
    }
}

/// Fresh placeholder portrait, seeded uniquely per call.
pub fn default_avatar_url() -> String {
    format!("https://picsum.photos/seed/{}/200/200", Uuid::new_v4())
}

fn default_show_mood_trends() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{AiPersonality, UserSettings};

    #[test]
    fn defaults_start_uninitialized_with_ai_off() {
        let settings = UserSettings::default();
        assert!(!settings.is_initialized);
        assert!(!settings.is_ai_enabled);
        assert!(settings.show_mood_trends);
        assert_eq!(settings.ai_personality, AiPersonality::Philosophical);
        assert!(settings.avatar_url.starts_with("https://picsum.photos/seed/"));
        assert!(settings.password_digest.is_none());
    }

    #[test]
    fn personality_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&AiPersonality::Poetic).expect("personality serializes");
        assert_eq!(json, "\"poetic\"");
        let parsed: AiPersonality =
            serde_json::from_str("\"concise\"").expect("lowercase name parses");
        assert_eq!(parsed, AiPersonality::Concise);
    }

    #[test]
    fn record_without_password_field_parses() {
        let parsed: UserSettings = serde_json::from_str(
            r#"{"userId":"ada","userName":"Ada","avatarUrl":"https://example.com/a.png","isInitialized":true,"isAiEnabled":false,"aiPersonality":"philosophical","showMoodTrends":true}"#,
        )
        .expect("record should parse");
        assert_eq!(parsed.user_id, "ada");
        assert!(parsed.password_digest.is_none());
    }
}
