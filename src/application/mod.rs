pub mod use_cases;

pub use use_cases::content_generation::ContentGenerationUseCase;
