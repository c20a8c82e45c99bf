use super::disclaimers::{GENERIC_DISCLAIMER, INJECTABLES_DISCLAIMER, LASER_DISCLAIMER};
use super::ContentGenerationUseCase;
use crate::application::use_cases::retry::tests::RecordingDelay;
use crate::domain::content::ContentRequest;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{ChatMessage, ChatRole, ProviderConfig, ProviderKind, RetryPolicy};
use crate::infrastructure::config::ProvidersConfig;
use crate::infrastructure::llm_clients::LLMClient;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const BOTOX_REPLY: &str =
    "Botox is safe when administered by professionals.\n\nHashtags:\n#botox #skincare #aesthetics";

/// Replays scripted replies and records which backend each call targeted.
#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<(ProviderKind, Vec<ChatMessage>)>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn providers_called(&self) -> Vec<ProviderKind> {
        self.calls.lock().unwrap().iter().map(|(kind, _)| *kind).collect()
    }
}

#[async_trait]
impl LLMClient for ScriptedClient {
    async fn complete(
        &self,
        config: &ProviderConfig,
        messages: &[ChatMessage],
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((config.provider, messages.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::LLMError("script exhausted".to_string())))
    }

    async fn list_models(&self, config: &ProviderConfig) -> Result<Vec<String>> {
        Ok(vec![format!("{}-model", config.provider)])
    }
}

fn providers_with_keys() -> ProvidersConfig {
    let mut providers = ProvidersConfig::default();
    providers.primary.api_key = Some("sk-test".to_string());
    providers.secondary.api_key = Some("gm-test".to_string());
    providers
}

fn use_case(
    client: Arc<ScriptedClient>,
    providers: ProvidersConfig,
) -> (ContentGenerationUseCase, Arc<RecordingDelay>) {
    let delay = Arc::new(RecordingDelay::default());
    let use_case = ContentGenerationUseCase::new(client, providers, RetryPolicy::default())
        .with_delay(delay.clone());
    (use_case, delay)
}

fn botox_request() -> ContentRequest {
    ContentRequest {
        topic: "Botox myths".to_string(),
        treatment_category: "injectables".to_string(),
        content_type: "educational".to_string(),
        platform: "instagram".to_string(),
        tone: "professional".to_string(),
        provider: "primary".to_string(),
        additional_context: None,
    }
}

#[tokio::test]
async fn test_end_to_end_botox_example() {
    let client = ScriptedClient::new(vec![Ok(BOTOX_REPLY.to_string())]);
    let (use_case, delay) = use_case(client.clone(), providers_with_keys());

    let content = use_case.execute(&botox_request()).await.unwrap();

    assert_eq!(
        content.main_text,
        "Botox is safe when administered by professionals."
    );
    assert_eq!(content.hashtags, vec!["#botox", "#skincare", "#aesthetics"]);
    assert_eq!(content.disclaimer, INJECTABLES_DISCLAIMER);
    assert!(content.image_prompt.starts_with("[OpenAI]"));
    assert_eq!(content.provider, ProviderKind::Primary);
    assert_eq!(client.providers_called(), vec![ProviderKind::Primary]);
    assert!(delay.waits.lock().unwrap().is_empty());

    let calls = client.calls.lock().unwrap();
    let messages = &calls[0].1;
    assert_eq!(messages[0].role, ChatRole::System);
    assert!(messages[1].content.contains("Topic: Botox myths"));
}

#[tokio::test]
async fn test_secondary_provider_is_dispatched() {
    let client = ScriptedClient::new(vec![Ok(BOTOX_REPLY.to_string())]);
    let (use_case, _) = use_case(client.clone(), providers_with_keys());
    let mut request = botox_request();
    request.provider = "secondary".to_string();

    let content = use_case.execute(&request).await.unwrap();

    assert_eq!(client.providers_called(), vec![ProviderKind::Secondary]);
    assert!(content.image_prompt.starts_with("[Gemini]"));
}

#[tokio::test]
async fn test_validation_failure_makes_no_calls() {
    let client = ScriptedClient::new(vec![Ok(BOTOX_REPLY.to_string())]);
    let (use_case, _) = use_case(client.clone(), providers_with_keys());
    let mut request = botox_request();
    request.topic = " ".to_string();
    request.provider = String::new();

    let err = use_case.execute(&request).await.unwrap_err();

    assert_eq!(
        err,
        AppError::ValidationError("Missing required fields: topic, provider".to_string())
    );
    assert!(client.providers_called().is_empty());
}

#[tokio::test]
async fn test_unsupported_provider_makes_no_calls() {
    let client = ScriptedClient::new(vec![Ok(BOTOX_REPLY.to_string())]);
    let (use_case, _) = use_case(client.clone(), providers_with_keys());
    let mut request = botox_request();
    request.provider = "anthropic".to_string();

    let err = use_case.execute(&request).await.unwrap_err();

    assert!(matches!(err, AppError::UnsupportedProvider(_)));
    assert!(client.providers_called().is_empty());
}

#[tokio::test]
async fn test_missing_credential_makes_no_calls() {
    let client = ScriptedClient::new(vec![Ok(BOTOX_REPLY.to_string())]);
    let mut providers = providers_with_keys();
    providers.secondary.api_key = None;
    let (use_case, _) = use_case(client.clone(), providers);
    let mut request = botox_request();
    request.provider = "secondary".to_string();

    let err = use_case.execute(&request).await.unwrap_err();

    assert!(matches!(err, AppError::ConfigurationError(ref msg) if msg.contains("secondary")));
    assert!(client.providers_called().is_empty());
}

#[tokio::test]
async fn test_fourth_attempt_success_is_returned() {
    let client = ScriptedClient::new(vec![
        Err(AppError::LLMError("timeout 1".to_string())),
        Err(AppError::LLMError("timeout 2".to_string())),
        Err(AppError::LLMError("rate limited".to_string())),
        Ok(BOTOX_REPLY.to_string()),
    ]);
    let (use_case, delay) = use_case(client.clone(), providers_with_keys());

    let content = use_case.execute(&botox_request()).await.unwrap();

    assert_eq!(content.hashtags.len(), 3);
    assert_eq!(client.providers_called().len(), 4);
    assert_eq!(
        *delay.waits.lock().unwrap(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(3000)
        ]
    );
}

#[tokio::test]
async fn test_exhausted_retries_wrap_last_error() {
    let client = ScriptedClient::new(vec![
        Err(AppError::LLMError("attempt 1".to_string())),
        Err(AppError::LLMError("attempt 2".to_string())),
        Err(AppError::LLMError("attempt 3".to_string())),
        Err(AppError::LLMError("attempt 4".to_string())),
        Ok(BOTOX_REPLY.to_string()),
    ]);
    let (use_case, _) = use_case(client.clone(), providers_with_keys());

    let err = use_case.execute(&botox_request()).await.unwrap_err();

    match err {
        AppError::GenerationError(msg) => {
            assert!(msg.contains("attempt 4"), "{}", msg);
            assert!(!msg.contains("attempt 3"), "{}", msg);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(client.providers_called().len(), 4);
}

#[tokio::test]
async fn test_missing_hashtags_is_terminal() {
    let client = ScriptedClient::new(vec![
        Ok("A lovely post without any tags.".to_string()),
        Ok(BOTOX_REPLY.to_string()),
    ]);
    let (use_case, _) = use_case(client.clone(), providers_with_keys());

    let err = use_case.execute(&botox_request()).await.unwrap_err();

    assert_eq!(
        err,
        AppError::GenerationError("Failed to generate hashtags".to_string())
    );
    assert_eq!(client.providers_called().len(), 1);
}

#[tokio::test]
async fn test_blank_completion_is_terminal() {
    let client = ScriptedClient::new(vec![
        Ok("  \n ".to_string()),
        Ok(BOTOX_REPLY.to_string()),
    ]);
    let (use_case, delay) = use_case(client.clone(), providers_with_keys());

    let err = use_case.execute(&botox_request()).await.unwrap_err();

    assert_eq!(
        err,
        AppError::GenerationError("Provider returned empty content".to_string())
    );
    assert_eq!(client.providers_called().len(), 1);
    assert!(delay.waits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disclaimer_lookup_and_fallback() {
    let client = ScriptedClient::new(vec![
        Ok(BOTOX_REPLY.to_string()),
        Ok(BOTOX_REPLY.to_string()),
    ]);
    let (use_case, _) = use_case(client, providers_with_keys());

    let mut laser = botox_request();
    laser.treatment_category = "laser".to_string();
    let content = use_case.execute(&laser).await.unwrap();
    assert_eq!(content.disclaimer, LASER_DISCLAIMER);

    let mut unknown = botox_request();
    unknown.treatment_category = "dermatology".to_string();
    let content = use_case.execute(&unknown).await.unwrap();
    assert_eq!(content.disclaimer, GENERIC_DISCLAIMER);
    assert!(content.image_prompt.ends_with("Treatment category: dermatology."));
}

#[tokio::test]
async fn test_list_models_requires_credential() {
    let client = ScriptedClient::new(Vec::new());
    let mut providers = providers_with_keys();
    providers.primary.api_key = None;
    let (use_case, _) = use_case(client, providers);

    assert!(matches!(
        use_case.list_models(ProviderKind::Primary).await,
        Err(AppError::ConfigurationError(_))
    ));
    assert_eq!(
        use_case.list_models(ProviderKind::Secondary).await.unwrap(),
        vec!["secondary-model"]
    );
}
