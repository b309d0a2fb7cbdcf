use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::{
    error::{Result, VidquizError},
    format::{preview, without_query},
    types::{GenerationRequest, GenerationResponse},
};

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

const LOG_PREVIEW_CHARS: usize = 500;

/// Turns a prompt into generated question text.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<String>;
}

pub struct GeminiQuestionGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiQuestionGenerator {
    pub fn new(client: reqwest::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Encoding failures are ours, not the provider's, so they land in the catch-all.
fn encode_request<T: Serialize>(request: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| VidquizError::Unexpected(e.into()))
}

#[async_trait]
impl QuestionGenerator for GeminiQuestionGenerator {
    async fn generate(&self, api_key: &str, request: &GenerationRequest) -> Result<String> {
        let endpoint = self.endpoint();
        let body = encode_request(request)?;

        tracing::info!(
            endpoint = %without_query(&endpoint),
            model = %self.model,
            prompt_len = request.prompt_text().len(),
            "Sending data to Gemini API"
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", api_key)])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status_code = status.as_u16(),
                error_body = %preview(&error_body, LOG_PREVIEW_CHARS),
                "Gemini API returned error status"
            );
            return Err(VidquizError::from_status(status));
        }

        let bytes = response.bytes().await?;
        tracing::info!(len = bytes.len(), "Received response from Gemini API");

        let parsed: GenerationResponse = serde_json::from_slice(&bytes)?;

        match parsed.first_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                tracing::error!(
                    block_reason = parsed.block_reason().unwrap_or("none"),
                    candidates = parsed.candidate_count(),
                    response = %preview(&String::from_utf8_lossy(&bytes), LOG_PREVIEW_CHARS),
                    "Content not found in Gemini API response"
                );
                Err(VidquizError::ContentNotFound)
            }
        }
    }
}
