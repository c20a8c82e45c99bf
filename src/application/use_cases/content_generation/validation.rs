use crate::domain::content::{ContentRequest, ContentType, REQUIRED_FIELDS};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::ProviderKind;
use validator::Validate;

/// A request whose required fields are present and whose closed-set fields
/// have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedRequest {
    pub topic: String,
    pub treatment_category: String,
    pub content_type: ContentType,
    pub platform: String,
    pub tone: String,
    pub provider: ProviderKind,
    pub additional_context: Option<String>,
}

/// Checks every required field before any network work.
///
/// All blank fields are reported in one `ValidationError`. An unknown provider
/// is `UnsupportedProvider`; an unknown content type is a validation error.
pub(crate) fn validate_request(request: &ContentRequest) -> Result<ValidatedRequest> {
    if let Err(errors) = request.validate() {
        let field_errors = errors.errors();
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .filter(|(field, wire)| {
                field_errors.contains_key(*field) || field_errors.contains_key(*wire)
            })
            .map(|(_, wire)| *wire)
            .collect();

        return Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let provider = request.provider.parse::<ProviderKind>()?;
    let content_type = request
        .content_type
        .parse::<ContentType>()
        .map_err(AppError::ValidationError)?;

    let additional_context = request
        .additional_context
        .as_deref()
        .map(str::trim)
        .filter(|context| !context.is_empty())
        .map(str::to_string);

    Ok(ValidatedRequest {
        topic: request.topic.trim().to_string(),
        treatment_category: request.treatment_category.trim().to_string(),
        content_type,
        platform: request.platform.trim().to_string(),
        tone: request.tone.trim().to_string(),
        provider,
        additional_context,
    })
}
