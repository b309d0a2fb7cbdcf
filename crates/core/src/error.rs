use thiserror::Error;

use crate::types::ErrorBody;

pub const SUGGESTED_ACTION: &str = "Check if the video exists and has captions available";

#[derive(Error, Debug)]
pub enum VidquizError {
    #[error("{env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("video_id is required")]
    MissingVideoId,

    #[error(
        "Transcript API HTTP Error: {status} - {reason}. Video ID: {video_id} might not exist or have captions available."
    )]
    TranscriptStatus {
        video_id: String,
        youtube_url: String,
        status: u16,
        reason: String,
    },

    #[error(
        "Transcript API request failed: {reason}. Video ID: {video_id} might not exist or have captions available."
    )]
    TranscriptRequest {
        video_id: String,
        youtube_url: String,
        reason: String,
    },

    #[error("HTTP Error: {status} - {reason}")]
    Http { status: u16, reason: String },

    #[error("URL Error: {0}")]
    Url(String),

    #[error("JSON Decode Error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("Error: Content not found in Gemini API response.")]
    ContentNotFound,

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl VidquizError {
    pub fn status_code(&self) -> u16 {
        match self {
            VidquizError::MissingApiKey { .. } | VidquizError::MissingVideoId => 400,
            VidquizError::TranscriptStatus { .. }
            | VidquizError::TranscriptRequest { .. } => 404,
            VidquizError::Http { .. }
            | VidquizError::Url(_)
            | VidquizError::JsonDecode(_)
            | VidquizError::ContentNotFound
            | VidquizError::Unexpected(_) => 500,
        }
    }

    /// Error payload returned to the caller. Transcript failures echo the
    /// video id and URL along with a remediation hint.
    pub fn body(&self) -> ErrorBody {
        let error = self.to_string();
        match self {
            VidquizError::TranscriptStatus {
                video_id,
                youtube_url,
                ..
            }
            | VidquizError::TranscriptRequest {
                video_id,
                youtube_url,
                ..
            } => ErrorBody {
                error,
                video_id: Some(video_id.clone()),
                youtube_url: Some(youtube_url.clone()),
                suggested_action: Some(SUGGESTED_ACTION.to_string()),
            },
            _ => ErrorBody::message(error),
        }
    }

    /// Converts an upstream non-success status into an `Http` error.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        VidquizError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

impl From<reqwest::Error> for VidquizError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return VidquizError::from_status(status);
        }
        if e.is_builder()
            || e.is_connect()
            || e.is_timeout()
            || e.is_request()
            || e.is_body()
            || e.is_redirect()
        {
            return VidquizError::Url(e.to_string());
        }
        VidquizError::Unexpected(e.into())
    }
}

pub type Result<T> = std::result::Result<T, VidquizError>;
