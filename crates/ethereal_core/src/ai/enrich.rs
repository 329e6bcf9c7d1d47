//! Analysis adapter over the generative transport.
//!
//! # Responsibility
//! - Decide whether an analysis call may happen at all (toggle, key, content).
//! - Build the analysis prompt, persona and response schema.
//! - Map every transport or parse failure to `None` so saves never block.
//!
//! # Invariants
//! - No unmet precondition reaches the transport: short-circuits make zero
//!   client calls.
//! - Per invocation the flow is `idle -> requesting -> {success | failed}`,
//!   one outstanding call per editor session, no retry.
//! - Aborting an in-flight analysis resolves it to `None`.

use crate::ai::client::{
    GenerateRequest, GenerativeClient, HttpGenerativeClient, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
use crate::model::analysis::AnalysisResult;
use crate::model::settings::{AiPersonality, UserSettings};
use futures::future::{AbortHandle, Abortable, Aborted};
use log::{debug, info, warn};
use std::future::Future;
use std::time::Instant;

/// Ambient fallback consulted when neither override nor settings carry a key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration candidate checked from the settings screen. Unset fields
/// fall back to the stored settings, then to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub custom_model: Option<String>,
}

/// Outcome of a configuration test, shaped for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
}

/// Aborts the analysis it was paired with.
#[derive(Debug, Clone)]
pub struct AnalysisHandle {
    inner: AbortHandle,
}

impl AnalysisHandle {
    /// Abandons the in-flight call; the paired future resolves to `None`.
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.is_aborted()
    }
}

/// Enrichment facade over a transport implementation.
pub struct EnrichmentService<C: GenerativeClient> {
    client: C,
}

impl<C: GenerativeClient> EnrichmentService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Analyzes entry text, returning `None` for every unmet precondition
    /// and every downstream failure. Callers treat `None` as "save without
    /// enrichment".
    pub async fn analyze(&self, settings: &UserSettings, content: &str) -> Option<AnalysisResult> {
        if !settings.is_ai_enabled {
            debug!("event=analyze module=ai status=skipped reason=disabled");
            return None;
        }
        if resolve_api_key(None, settings).is_none() {
            debug!("event=analyze module=ai status=skipped reason=no_api_key");
            return None;
        }
        if content.trim().is_empty() {
            debug!("event=analyze module=ai status=skipped reason=empty_content");
            return None;
        }

        let request = GenerateRequest {
            model: resolve_model(None, settings),
            prompt: analysis_prompt(content),
            system_instruction: Some(system_instruction(settings.ai_personality).to_string()),
            response_schema: Some(analysis_schema()),
        };

        let started_at = Instant::now();
        info!(
            "event=analyze module=ai status=start model={}",
            request.model
        );
        match self.client.generate(&request).await {
            Ok(payload) => match serde_json::from_str::<AnalysisResult>(payload.trim()) {
                Ok(result) => {
                    info!(
                        "event=analyze module=ai status=ok duration_ms={} mood={}",
                        started_at.elapsed().as_millis(),
                        result.mood
                    );
                    Some(result)
                }
                Err(err) => {
                    warn!(
                        "event=analyze module=ai status=failed duration_ms={} error=unparsable_payload detail={err}",
                        started_at.elapsed().as_millis()
                    );
                    None
                }
            },
            Err(err) => {
                warn!(
                    "event=analyze module=ai status=failed duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                None
            }
        }
    }

    /// Like [`analyze`](Self::analyze), paired with a handle tied to the
    /// editor's lifetime: aborting resolves the future to `None`, so a
    /// response arriving after the editor closed is never consumed.
    pub fn analyze_abortable<'a>(
        &'a self,
        settings: &'a UserSettings,
        content: &'a str,
    ) -> (
        impl Future<Output = Option<AnalysisResult>> + 'a,
        AnalysisHandle,
    ) {
        let (handle, registration) = AbortHandle::new_pair();
        let task = Abortable::new(self.analyze(settings, content), registration);
        let future = async move {
            match task.await {
                Ok(result) => result,
                Err(Aborted) => {
                    info!("event=analyze module=ai status=aborted");
                    None
                }
            }
        };
        (future, AnalysisHandle { inner: handle })
    }

    /// Minimal no-op prompt validating the configuration being edited.
    /// Never part of the save path.
    pub async fn test_connection(
        &self,
        settings: &UserSettings,
        overrides: &ConnectionOverrides,
    ) -> ConnectionReport {
        if resolve_api_key(overrides.api_key.as_deref(), settings).is_none() {
            return ConnectionReport {
                success: false,
                message: format!("No API key configured. Enter a key or set {API_KEY_ENV}."),
            };
        }

        let model = resolve_model(overrides.custom_model.as_deref(), settings);
        let request = GenerateRequest {
            model: model.clone(),
            prompt: "Reply with the single word: OK".to_string(),
            system_instruction: None,
            response_schema: None,
        };

        info!("event=test_connection module=ai status=start model={model}");
        match self.client.generate(&request).await {
            Ok(_) => {
                info!("event=test_connection module=ai status=ok model={model}");
                ConnectionReport {
                    success: true,
                    message: format!("Connected. Model `{model}` responded."),
                }
            }
            Err(err) => {
                warn!("event=test_connection module=ai status=failed model={model} error={err}");
                ConnectionReport {
                    success: false,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Builds the HTTP transport for the given configuration; `None` when no
/// API key is resolvable anywhere.
pub fn http_client_for(
    settings: &UserSettings,
    overrides: &ConnectionOverrides,
) -> Option<HttpGenerativeClient> {
    let api_key = resolve_api_key(overrides.api_key.as_deref(), settings)?;
    let base_url = resolve_base_url(overrides.api_base_url.as_deref(), settings);
    Some(HttpGenerativeClient::with_base_url(api_key, base_url))
}

/// Key precedence: explicit override, stored settings, then the
/// `GEMINI_API_KEY` environment fallback. Blank values do not count.
pub fn resolve_api_key(explicit: Option<&str>, settings: &UserSettings) -> Option<String> {
    non_blank(explicit.map(str::to_string))
        .or_else(|| non_blank(settings.api_key.clone()))
        .or_else(|| non_blank(std::env::var(API_KEY_ENV).ok()))
}

/// Model precedence: explicit override, stored settings, built-in default.
pub fn resolve_model(explicit: Option<&str>, settings: &UserSettings) -> String {
    non_blank(explicit.map(str::to_string))
        .or_else(|| non_blank(settings.custom_model.clone()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Base-URL precedence: explicit override, stored settings, built-in default.
pub fn resolve_base_url(explicit: Option<&str>, settings: &UserSettings) -> String {
    non_blank(explicit.map(str::to_string))
        .or_else(|| non_blank(settings.api_base_url.clone()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn analysis_prompt(content: &str) -> String {
    format!("Analyze the following journal thought and offer insight: \"{content}\"")
}

fn system_instruction(personality: AiPersonality) -> &'static str {
    match personality {
        AiPersonality::Philosophical => {
            "You are a gentle, insightful journaling companion. Help the writer make sense of \
             their thoughts, offer brief philosophical reflections, and extract the key themes."
        }
        AiPersonality::Poetic => {
            "You are a gentle journaling companion with a poet's ear. Reflect the writer's \
             thoughts back in evocative, imagistic language, keep responses brief, and extract \
             the key themes."
        }
        AiPersonality::Concise => {
            "You are a focused journaling companion. Respond with short, plain observations, \
             no embellishment, and extract the key themes."
        }
    }
}

fn analysis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A very concise one-sentence summary of the thought."
            },
            "tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Up to 3 relevant tags or keywords."
            },
            "wisdom": {
                "type": "STRING",
                "description": "A brief, gentle, philosophical perspective or follow-up question based on the content."
            },
            "mood": {
                "type": "STRING",
                "description": "The emotional tone of the thought (e.g., Calm, Anxious, Inspired, Reflective)."
            }
        },
        "required": ["summary", "tags", "wisdom", "mood"]
    })
}
