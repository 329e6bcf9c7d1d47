use ethereal_core::{
    ClientError, ConnectionOverrides, EnrichmentService, GenerateRequest, GenerativeClient,
    UserSettings, API_KEY_ENV,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn analyze_skips_when_ai_disabled() {
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let mut settings = ai_settings(Some("key"));
    settings.is_ai_enabled = false;

    assert!(service.analyze(&settings, "an entry").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_skips_without_api_key() {
    std::env::remove_var(API_KEY_ENV);
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let settings = ai_settings(None);

    assert!(service.analyze(&settings, "an entry").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_skips_empty_content() {
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let settings = ai_settings(Some("key"));

    assert!(service.analyze(&settings, "   \n").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn analyze_parses_a_full_payload() {
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let settings = ai_settings(Some("key"));

    let result = service.analyze(&settings, "long day at work").await.unwrap();
    assert_eq!(result.mood, "Calm");
    assert_eq!(result.summary.as_deref(), Some("one line"));
    assert_eq!(result.tags, Some(vec!["work".to_string()]));
    assert_eq!(result.wisdom.as_deref(), Some("what helped?"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn analyze_tolerates_unparsable_payload() {
    let (service, calls) = mock_service(MockResponse::Payload("not json".to_string()));
    let settings = ai_settings(Some("key"));

    assert!(service.analyze(&settings, "an entry").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn analyze_tolerates_api_errors() {
    let (service, calls) = mock_service(MockResponse::ApiError(429, "quota".to_string()));
    let settings = ai_settings(Some("key"));

    assert!(service.analyze(&settings, "an entry").await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn aborted_analysis_resolves_to_none_without_a_call() {
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let settings = ai_settings(Some("key"));

    let (future, handle) = service.analyze_abortable(&settings, "a slow entry");
    handle.abort();
    assert!(handle.is_aborted());

    assert!(future.await.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unaborted_analysis_completes_normally() {
    let (service, calls) = mock_service(MockResponse::Payload(full_payload()));
    let settings = ai_settings(Some("key"));

    let (future, handle) = service.analyze_abortable(&settings, "an entry");
    let result = future.await.unwrap();
    assert_eq!(result.mood, "Calm");
    assert!(!handle.is_aborted());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connection_reports_missing_key() {
    std::env::remove_var(API_KEY_ENV);
    let (service, calls) = mock_service(MockResponse::Payload("OK".to_string()));
    let settings = UserSettings::default();

    let report = service
        .test_connection(&settings, &ConnectionOverrides::default())
        .await;
    assert!(!report.success);
    assert!(report.message.contains("No API key"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_connection_success_names_the_model() {
    let (service, _calls) = mock_service(MockResponse::Payload("OK".to_string()));
    let mut settings = ai_settings(Some("key"));
    settings.custom_model = Some("gemini-pro-max".to_string());

    let report = service
        .test_connection(&settings, &ConnectionOverrides::default())
        .await;
    assert!(report.success);
    assert!(report.message.contains("gemini-pro-max"));
}

#[tokio::test]
async fn test_connection_override_beats_stored_model() {
    let (service, _calls) = mock_service(MockResponse::Payload("OK".to_string()));
    let mut settings = ai_settings(Some("key"));
    settings.custom_model = Some("stored-model".to_string());

    let overrides = ConnectionOverrides {
        custom_model: Some("form-model".to_string()),
        ..ConnectionOverrides::default()
    };
    let report = service.test_connection(&settings, &overrides).await;
    assert!(report.success);
    assert!(report.message.contains("form-model"));
}

#[tokio::test]
async fn test_connection_reports_api_failure() {
    let (service, _calls) = mock_service(MockResponse::ApiError(401, "bad key".to_string()));
    let settings = ai_settings(Some("key"));

    let report = service
        .test_connection(&settings, &ConnectionOverrides::default())
        .await;
    assert!(!report.success);
    assert!(report.message.contains("401"));
}

enum MockResponse {
    Payload(String),
    ApiError(u16, String),
}

struct MockClient {
    calls: Arc<AtomicUsize>,
    response: MockResponse,
}

impl GenerativeClient for MockClient {
    async fn generate(&self, _request: &GenerateRequest) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            MockResponse::Payload(payload) => Ok(payload.clone()),
            MockResponse::ApiError(status, message) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

fn mock_service(response: MockResponse) -> (EnrichmentService<MockClient>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = MockClient {
        calls: Arc::clone(&calls),
        response,
    };
    (EnrichmentService::new(client), calls)
}

fn ai_settings(api_key: Option<&str>) -> UserSettings {
    let mut settings = UserSettings::default();
    settings.is_ai_enabled = true;
    settings.api_key = api_key.map(str::to_string);
    settings
}

fn full_payload() -> String {
    r#"{"summary":"one line","tags":["work"],"wisdom":"what helped?","mood":"Calm"}"#.to_string()
}
