mod application;
mod domain;
mod infrastructure;
mod interfaces;

mod app;

pub use app::run;
pub use application::ContentGenerationUseCase;
pub use domain::content::{ContentRequest, GeneratedContent};
pub use domain::error::{AppError, Result};
