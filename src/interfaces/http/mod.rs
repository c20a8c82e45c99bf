use crate::application::ContentGenerationUseCase;
use crate::domain::content::{ContentRequest, ContentType, TREATMENT_CATEGORIES};
use crate::domain::error::AppError;
use crate::domain::llm_config::ProviderKind;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{
    dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub content_use_case: Arc<ContentGenerationUseCase>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    pub api_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOptions {
    pub treatment_categories: Vec<&'static str>,
    pub content_types: Vec<&'static str>,
    pub providers: Vec<&'static str>,
}

fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) | AppError::UnsupportedProvider(_) => StatusCode::BAD_REQUEST,
        AppError::ConfigurationError(_) => StatusCode::FAILED_DEPENDENCY,
        AppError::GenerationError(_) | AppError::LLMError(_) => StatusCode::BAD_GATEWAY,
        AppError::Internal(_) | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &AppError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(json!({
        "error": err.kind(),
        "message": err.to_string(),
    }))
}

/// Compares every byte so the time taken does not reveal a matching prefix.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(&AppError::ValidationError(format!(
        "Invalid request body: {}",
        err
    )));
    InternalError::from_response(err, response).into()
}

/// Rejects the call unless it carries the configured bearer token.
fn authorize(req: &HttpRequest, data: &HttpState) -> Option<HttpResponse> {
    let expected = data.api_token.as_deref()?;
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    if provided.is_some_and(|token| tokens_match(token, expected)) {
        return None;
    }
    add_log(&data.logs, "WARN", "HttpApi", "Rejected unauthenticated request");
    Some(HttpResponse::Unauthorized().json(json!({
        "error": "unauthorized",
        "message": "Missing or invalid bearer token",
    })))
}

#[post("/content/generate")]
async fn generate_content(
    req: HttpRequest,
    data: web::Data<HttpState>,
    body: web::Json<ContentRequest>,
) -> impl Responder {
    if let Some(rejection) = authorize(&req, &data) {
        return rejection;
    }

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Generating content (provider={} content_type={} platform={})",
            body.provider, body.content_type, body.platform
        ),
    );

    match data.content_use_case.execute(&body).await {
        Ok(content) => HttpResponse::Ok().json(content),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Content generation failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/content/options")]
async fn content_options(req: HttpRequest, data: web::Data<HttpState>) -> impl Responder {
    if let Some(rejection) = authorize(&req, &data) {
        return rejection;
    }

    HttpResponse::Ok().json(ContentOptions {
        treatment_categories: TREATMENT_CATEGORIES.to_vec(),
        content_types: ContentType::ALL.iter().map(|kind| kind.as_str()).collect(),
        providers: ProviderKind::ALL.iter().map(|kind| kind.as_str()).collect(),
    })
}

#[get("/providers/{provider}/models")]
async fn list_models(
    req: HttpRequest,
    data: web::Data<HttpState>,
    path: web::Path<String>,
) -> impl Responder {
    if let Some(rejection) = authorize(&req, &data) {
        return rejection;
    }

    let provider = match path.parse::<ProviderKind>() {
        Ok(provider) => provider,
        Err(e) => return error_response(&e),
    };

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Fetching models (provider={})", provider),
    );

    match data.content_use_case.list_models(provider).await {
        Ok(models) => HttpResponse::Ok().json(models),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Failed to list models: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(req: HttpRequest, data: web::Data<HttpState>) -> impl Responder {
    if let Some(rejection) = authorize(&req, &data) {
        return rejection;
    }
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(generate_content)
        .service(content_options)
        .service(list_models)
        .service(get_logs)
        .service(health)
}

pub fn start_server(state: HttpState, config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
