//! Content generation pipeline: validate, dispatch with retry, parse.

pub mod disclaimers;
mod parsing;
mod prompts;
#[cfg(test)]
mod tests;
mod validation;

use crate::application::use_cases::retry::{with_retry, Delay, TokioDelay};
use crate::domain::content::{ContentRequest, GeneratedContent};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{ProviderKind, RetryPolicy};
use crate::infrastructure::config::ProvidersConfig;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use parsing::parse_completion;
use prompts::build_messages;
use validation::validate_request;

pub struct ContentGenerationUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    providers: ProvidersConfig,
    retry_policy: RetryPolicy,
    delay: Arc<dyn Delay>,
}

impl ContentGenerationUseCase {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        providers: ProvidersConfig,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            llm_client,
            providers,
            retry_policy,
            delay: Arc::new(TokioDelay),
        }
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub async fn execute(&self, request: &ContentRequest) -> Result<GeneratedContent> {
        let request_id = Uuid::new_v4();
        let validated = validate_request(request)?;
        let provider = validated.provider;

        let config = self.providers.get(provider);
        config.require_api_key()?;

        info!(
            %request_id,
            provider = %provider,
            content_type = %validated.content_type,
            treatment_category = %validated.treatment_category,
            platform = %validated.platform,
            "Generating content"
        );

        let messages = build_messages(&validated);
        let client = &self.llm_client;
        let messages = messages.as_slice();
        let raw = with_retry(&self.retry_policy, self.delay.as_ref(), move |_| {
            client.complete(config, messages)
        })
        .await
        .map_err(|err| {
            error!(%request_id, provider = %provider, error = %err, "Provider retries exhausted");
            AppError::GenerationError(format!(
                "{} provider failed after {} attempts: {}",
                provider,
                self.retry_policy.max_attempts(),
                err
            ))
        })?;

        let content = parse_completion(&raw, &validated).map_err(|err| {
            error!(%request_id, provider = %provider, error = %err, "Completion could not be parsed");
            err
        })?;

        info!(
            %request_id,
            provider = %provider,
            hashtags = content.hashtags.len(),
            "Content generated"
        );
        Ok(content)
    }

    pub async fn list_models(&self, provider: ProviderKind) -> Result<Vec<String>> {
        let config = self.providers.get(provider);
        config.require_api_key()?;
        self.llm_client.list_models(config).await
    }
}
