//! Vidquiz Core Library
//!
//! Fetches a YouTube transcript, asks Gemini for a multiple-choice question set
//! built from it, and maps the outcome onto a serverless-style response.

pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod orchestrator;
pub mod prompt;
pub mod transcript;
pub mod types;

// Re-export commonly used items at crate root
pub use config::Config;
pub use error::{Result, VidquizError};
pub use generator::{GeminiQuestionGenerator, QuestionGenerator};
pub use orchestrator::RequestOrchestrator;
pub use prompt::{QUESTION_PROMPT, build_prompt};
pub use transcript::{AnthiagoTranscriptFetcher, TranscriptFetcher};
pub use types::{
    ErrorBody, GenerationRequest, GenerationResponse, InvocationEvent, InvocationResponse,
    SuccessBody,
};
