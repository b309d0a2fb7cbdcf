use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::VidquizError;

/// Input event of a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationEvent {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl InvocationEvent {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: Some(video_id.into()),
        }
    }

    /// Builds an event from an arbitrary JSON payload. A missing or non-string
    /// `video_id` leaves the field empty so validation reports it.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            video_id: value["video_id"].as_str().map(str::to_string),
        }
    }

    /// The video id, if present and not blank.
    pub fn video_id(&self) -> Option<&str> {
        self.video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Output of a single invocation, shaped like a function-URL/API-gateway response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    pub body: String,
}

impl InvocationResponse {
    pub fn success(body: &SuccessBody) -> Self {
        Self {
            status_code: 200,
            headers: Some(cors_headers()),
            body: encode_body(body),
        }
    }

    pub fn failure(error: &VidquizError) -> Self {
        Self {
            status_code: error.status_code(),
            headers: None,
            body: encode_body(&error.body()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Headers attached to successful responses so browsers can call the function directly.
pub fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn encode_body<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body)
        .unwrap_or_else(|_| r#"{"error":"Unexpected error: failed to encode response body"}"#.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
    pub questions: String,
    pub video_id: String,
}

impl SuccessBody {
    pub fn new(questions: String, video_id: String) -> Self {
        Self {
            success: true,
            questions,
            video_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorBody {
    pub fn message(error: String) -> Self {
        Self {
            error,
            video_id: None,
            youtube_url: None,
            suggested_action: None,
        }
    }
}

// Generation provider wire format

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: SamplingParameters,
}

impl GenerationRequest {
    pub fn new(prompt_text: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt_text }],
            }],
            generation_config: SamplingParameters::default(),
        }
    }

    pub fn prompt_text(&self) -> &str {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParameters {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Parsed generation reply. Kept as loose JSON so any well-formed body without
/// the expected text path reads as "no content" rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct GenerationResponse(serde_json::Value);

impl GenerationResponse {
    /// Text of the first part of the first candidate, when present and non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.0
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.0
            .pointer("/promptFeedback/blockReason")
            .and_then(serde_json::Value::as_str)
    }

    pub fn candidate_count(&self) -> usize {
        self.0["candidates"].as_array().map_or(0, Vec::len)
    }
}
