//! Startup configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, the TOML file,
//! `OPENAI_API_KEY` / `GEMINI_API_KEY`, then `CLINICPOST_*` variables with
//! `__` as the nesting separator (e.g. `CLINICPOST_SERVER__PORT=8080`).

use crate::domain::error::Result;
use crate::domain::llm_config::{ProviderConfig, ProviderKind, RetryPolicy};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "clinicpost.toml";
pub const CONFIG_PATH_ENV: &str = "CLINICPOST_CONFIG";
pub const ENV_PREFIX: &str = "CLINICPOST_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// When set, `/api` routes require `Authorization: Bearer <token>`.
    pub api_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    pub primary: ProviderConfig,
    pub secondary: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            primary: ProviderConfig::primary_default(),
            secondary: ProviderConfig::secondary_default(),
        }
    }
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Primary => &self.primary,
            ProviderKind::Secondary => &self.secondary,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Loads `.env` if present, then extracts the merged configuration.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "Failed to read .env file");
            }
        }

        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_figment(Self::figment(&path))
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(
                Env::raw()
                    .only(&["OPENAI_API_KEY"])
                    .map(|_| "providers.primary.api_key".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "providers.secondary.api_key".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: AppConfig = figment.extract()?;
        // Each slot is bound to its backend regardless of what the file says.
        config.providers.primary.provider = ProviderKind::Primary;
        config.providers.secondary.provider = ProviderKind::Secondary;
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
