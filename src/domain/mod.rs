pub mod content;
pub mod error;
pub mod llm_config;
