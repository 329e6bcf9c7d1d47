//! Generative-API transport.
//!
//! # Responsibility
//! - Define the transport seam the enrichment adapter calls through.
//! - Implement it against the Gemini REST surface.
//!
//! # Invariants
//! - The client sends exactly what it is handed; precondition checks (keys,
//!   toggles, content) live in the adapter.
//! - A successful call returns the concatenated text of the first candidate.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Endpoint used when no base-URL override is configured.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used when no model override is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// One generate-content invocation.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Model identifier, e.g. `gemini-3-flash-preview`.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// Assistant persona for this call.
    pub system_instruction: Option<String>,
    /// JSON schema constraining the response body; `None` for free-form text.
    pub response_schema: Option<serde_json::Value>,
}

/// Transport error for generative calls.
#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or its body could not be read.
    Transport(reqwest::Error),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The response carried no generated text.
    EmptyResponse,
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Api { status, message } => write!(f, "API error (HTTP {status}): {message}"),
            Self::EmptyResponse => write!(f, "API returned no content"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Api { .. } | Self::EmptyResponse => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Transport seam for the generative API.
///
/// Kept as a plain async trait so tests can substitute a scripted client and
/// count invocations.
#[allow(async_fn_in_trait)]
pub trait GenerativeClient {
    /// Sends one generate-content request and returns the model's text payload.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ClientError>;
}

/// Gemini REST implementation of [`GenerativeClient`].
pub struct HttpGenerativeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpGenerativeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Points the client at a proxy or regional endpoint.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: normalize_base_url(base_url.into()),
        }
    }
}

impl GenerativeClient for HttpGenerativeClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ClientError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = WireRequest {
            contents: vec![WireContent {
                parts: vec![WirePart {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system_instruction.as_deref().map(|text| WireContent {
                parts: vec![WirePart { text }],
            }),
            generation_config: request.response_schema.as_ref().map(|schema| {
                WireGenerationConfig {
                    response_mime_type: "application/json",
                    response_schema: Some(schema),
                }
            }),
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = parse_api_error(&raw).unwrap_or(raw);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: WireResponse = response.json().await?;
        extract_text(payload).ok_or(ClientError::EmptyResponse)
    }
}

fn normalize_base_url(mut value: String) -> String {
    while value.ends_with('/') {
        value.pop();
    }
    if value.trim().is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        value
    }
}

fn parse_api_error(body: &str) -> Option<String> {
    let envelope: WireErrorEnvelope = serde_json::from_str(body).ok()?;
    let message = envelope.error?.message;
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

fn extract_text(payload: WireResponse) -> Option<String> {
    let candidate = payload.candidates.into_iter().next()?;
    let parts = candidate.content?.parts;
    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig<'a> {
    response_mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireCandidateContent>,
}

#[derive(Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct WireErrorEnvelope {
    error: Option<WireErrorBody>,
}

#[derive(Deserialize)]
struct WireErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::{extract_text, normalize_base_url, parse_api_error, WireResponse, DEFAULT_BASE_URL};

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        assert_eq!(
            normalize_base_url("https://proxy.example.com/".to_string()),
            "https://proxy.example.com"
        );
        assert_eq!(normalize_base_url(String::new()), DEFAULT_BASE_URL);
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let payload: WireResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"mood\":"},{"text":"\"Calm\"}"}]}}]}"#,
        )
        .expect("payload should parse");
        assert_eq!(extract_text(payload).as_deref(), Some("{\"mood\":\"Calm\"}"));
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let payload: WireResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).expect("payload should parse");
        assert!(extract_text(payload).is_none());
    }

    #[test]
    fn api_error_message_is_unwrapped() {
        let message = parse_api_error(r#"{"error":{"code":400,"message":"API key not valid"}}"#);
        assert_eq!(message.as_deref(), Some("API key not valid"));
        assert!(parse_api_error("plain failure text").is_none());
    }
}
