use super::disclaimers::disclaimer_for;
use super::validation::ValidatedRequest;
use crate::domain::content::{ContentType, GeneratedContent};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::response::strip_reasoning_artifacts;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const MAX_HASHTAGS: usize = 7;

static HASHTAG_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\n\nHashtags:").unwrap());

static HASHTAG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").unwrap());

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SplitCompletion {
    pub main_text: String,
    pub hashtags: Vec<String>,
}

/// Splits a completion into trimmed body text and at most seven `#` tokens.
/// A completion without a `Hashtags:` section yields no hashtags.
pub(crate) fn split_completion(raw: &str) -> SplitCompletion {
    let mut sections = HASHTAG_MARKER.splitn(raw, 2);
    let main_text = sections.next().unwrap_or_default().trim().to_string();

    let hashtags = sections
        .next()
        .map(|section| {
            HASHTAG_SEPARATOR
                .split(section)
                .filter(|token| token.starts_with('#') && token.len() > 1)
                .take(MAX_HASHTAGS)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    SplitCompletion {
        main_text,
        hashtags,
    }
}

pub(crate) fn build_image_prompt(request: &ValidatedRequest) -> String {
    let mut prompt = format!(
        "[{}] Professional, high-quality photograph for an aesthetic clinic's {} social media post about {}.",
        request.provider.label(),
        request.content_type,
        request.topic
    );
    if request.content_type == ContentType::BeforeAfter {
        prompt.push_str(" Side-by-side before and after composition with identical framing and lighting.");
    }
    prompt.push_str(" Clean, bright, modern clinical setting with soft natural light and an elegant, trustworthy look. Treatment category: ");
    prompt.push_str(&request.treatment_category);
    prompt.push('.');
    prompt
}

/// Turns one completion into the structured post. Parse failures are terminal.
pub(crate) fn parse_completion(raw: &str, request: &ValidatedRequest) -> Result<GeneratedContent> {
    let cleaned = strip_reasoning_artifacts(raw);
    let split = split_completion(&cleaned);

    if split.main_text.is_empty() {
        return Err(AppError::GenerationError(
            "Provider returned empty content".to_string(),
        ));
    }
    if split.hashtags.is_empty() {
        return Err(AppError::GenerationError(
            "Failed to generate hashtags".to_string(),
        ));
    }

    Ok(GeneratedContent {
        main_text: split.main_text,
        hashtags: split.hashtags,
        image_prompt: build_image_prompt(request),
        disclaimer: disclaimer_for(&request.treatment_category).to_string(),
        provider: request.provider,
    })
}
