use std::io;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::ContentGenerationUseCase;
use crate::domain::llm_config::ProviderKind;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{LLMClient, ProviderRouter};
use crate::interfaces::http::{add_log, start_server, HttpState, LogEntry};

pub async fn run() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = AppConfig::load().map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    for kind in ProviderKind::ALL {
        let provider = config.providers.get(kind);
        match provider.require_api_key() {
            Ok(_) => info!(provider = %kind, model = %provider.model, "Provider configured"),
            Err(err) => {
                warn!(provider = %kind, error = %err, "Provider has no API key; requests for it will fail");
                add_log(&logs, "WARN", "Config", &err.to_string());
            }
        }
    }

    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(ProviderRouter::new());
    let content_use_case = Arc::new(ContentGenerationUseCase::new(
        llm_client,
        config.providers.clone(),
        config.retry,
    ));

    let state = HttpState {
        content_use_case,
        logs: logs.clone(),
        api_token: config.server.api_token.clone(),
    };

    let server = start_server(state, &config.server)?;
    let (host, port) = config.bind_address();
    info!(%host, port, "HTTP API listening");
    add_log(
        &logs,
        "INFO",
        "Server",
        &format!("Listening on http://{}:{}/api", host, port),
    );

    server.await
}
