use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{Result, VidquizError},
    generator::{GeminiQuestionGenerator, QuestionGenerator},
    prompt::build_prompt,
    transcript::{AnthiagoTranscriptFetcher, TranscriptFetcher},
    types::{GenerationRequest, InvocationEvent, InvocationResponse, SuccessBody},
};

/// Runs one invocation: transcript fetch, prompt construction, generation, response mapping.
pub struct RequestOrchestrator {
    config: Config,
    fetcher: Box<dyn TranscriptFetcher>,
    generator: Box<dyn QuestionGenerator>,
}

impl RequestOrchestrator {
    pub fn new(
        config: Config,
        fetcher: Box<dyn TranscriptFetcher>,
        generator: Box<dyn QuestionGenerator>,
    ) -> Self {
        Self {
            config,
            fetcher,
            generator,
        }
    }

    /// Wires the HTTP-backed fetcher and generator around one shared client.
    pub fn from_config(config: Config) -> Self {
        let client = reqwest::Client::new();
        let fetcher = AnthiagoTranscriptFetcher::new(client.clone(), &config.transcript_language);
        let generator = GeminiQuestionGenerator::new(client, &config.model);
        Self::new(config, Box::new(fetcher), Box::new(generator))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Never fails: every error is logged and mapped to a status code.
    pub async fn handle(&self, event: &InvocationEvent) -> InvocationResponse {
        let span = tracing::info_span!(
            "invocation",
            invocation_id = %Uuid::new_v4(),
            video_id = event.video_id().unwrap_or_default(),
        );

        async {
            match self.run(event).await {
                Ok(body) => {
                    tracing::info!("Questions generated successfully");
                    InvocationResponse::success(&body)
                }
                Err(e) => {
                    tracing::error!(status_code = e.status_code(), error = %e, "Invocation failed");
                    InvocationResponse::failure(&e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, event: &InvocationEvent) -> Result<SuccessBody> {
        let api_key = self.config.require_api_key()?;
        let video_id = event.video_id().ok_or(VidquizError::MissingVideoId)?;

        let transcript = self.fetcher.fetch(video_id).await?;

        let request = GenerationRequest::new(build_prompt(&transcript));
        let questions = self.generator.generate(api_key, &request).await?;

        Ok(SuccessBody::new(questions, video_id.to_string()))
    }
}
