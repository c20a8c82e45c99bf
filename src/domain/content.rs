use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::domain::llm_config::ProviderKind;

/// Raw generation request as received from the client form.
///
/// Missing and `null` fields deserialize to empty strings so that every absent
/// field is reported together by validation instead of failing JSON extraction
/// on the first.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub topic: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub treatment_category: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub content_type: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub platform: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub tone: String,
    #[validate(custom(function = "validate_not_blank"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub provider: String,
    pub additional_context: Option<String>,
}

/// Required fields as (struct field, wire name), in reporting order.
pub const REQUIRED_FIELDS: [(&str, &str); 6] = [
    ("topic", "topic"),
    ("treatment_category", "treatmentCategory"),
    ("content_type", "contentType"),
    ("platform", "platform"),
    ("tone", "tone"),
    ("provider", "provider"),
];

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub main_text: String,
    pub hashtags: Vec<String>,
    pub image_prompt: String,
    pub disclaimer: String,
    pub provider: ProviderKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Educational,
    BeforeAfter,
    Promotional,
    Procedure,
    Tips,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Educational,
        ContentType::BeforeAfter,
        ContentType::Promotional,
        ContentType::Procedure,
        ContentType::Tips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Educational => "educational",
            ContentType::BeforeAfter => "beforeAfter",
            ContentType::Promotional => "promotional",
            ContentType::Procedure => "procedure",
            ContentType::Tips => "tips",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown content type: {}", s))
    }
}

/// Treatment categories that carry a dedicated disclaimer.
pub const TREATMENT_CATEGORIES: [&str; 6] = [
    "skincare",
    "injectables",
    "laser",
    "antiaging",
    "body",
    "wellness",
];
