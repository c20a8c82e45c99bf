pub mod gemini;
pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::{ChatMessage, ProviderConfig, ProviderKind};
use async_trait::async_trait;
use gemini::GeminiClient;
use openai::OpenAIClient;

#[async_trait]
pub trait LLMClient {
    /// Produce one completion for the ordered, role-tagged messages.
    async fn complete(&self, config: &ProviderConfig, messages: &[ChatMessage])
        -> Result<String>;
    async fn list_models(&self, config: &ProviderConfig) -> Result<Vec<String>>;
}

/// Dispatches to the backend named by `config.provider`.
pub struct ProviderRouter {
    openai: OpenAIClient,
    gemini: GeminiClient,
}

impl ProviderRouter {
    pub fn new() -> Self {
        Self {
            openai: OpenAIClient::new(),
            gemini: GeminiClient::new(),
        }
    }
}

impl Default for ProviderRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for ProviderRouter {
    async fn complete(
        &self,
        config: &ProviderConfig,
        messages: &[ChatMessage],
    ) -> Result<String> {
        match config.provider {
            ProviderKind::Primary => self.openai.complete(config, messages).await,
            ProviderKind::Secondary => self.gemini.complete(config, messages).await,
        }
    }

    async fn list_models(&self, config: &ProviderConfig) -> Result<Vec<String>> {
        match config.provider {
            ProviderKind::Primary => self.openai.list_models(config).await,
            ProviderKind::Secondary => self.gemini.list_models(config).await,
        }
    }
}

pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}
