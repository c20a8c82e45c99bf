pub mod content_generation;
pub mod retry;
