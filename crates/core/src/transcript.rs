use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{REFERER, USER_AGENT},
};

use crate::{
    error::{Result, VidquizError},
    format::preview,
};

pub const TRANSCRIPT_API_URL: &str = "https://apiv2.anthiago.com/transcript";
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

const TRANSCRIPT_REFERER: &str = "https://anthiago.com/desgrabador/";
const TRANSCRIPT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";
const LOG_PREVIEW_CHARS: usize = 500;

/// Source of raw transcript text for a video.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<String>;
}

pub fn youtube_url(video_id: &str) -> String {
    format!("{}/{}", YOUTUBE_BASE_URL, video_id)
}

/// Percent-encodes the video URL but keeps `/` literal, the form the provider is known to accept.
pub fn transcript_request_url(base_url: &str, youtube_url: &str, language: &str) -> String {
    format!(
        "{}?get_video={}&codeL={}",
        base_url,
        urlencoding::encode(youtube_url).replace("%2F", "/"),
        urlencoding::encode(language)
    )
}

/// Fetches plain-text transcripts from the anthiago transcript API.
pub struct AnthiagoTranscriptFetcher {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl AnthiagoTranscriptFetcher {
    pub fn new(client: reqwest::Client, language: impl Into<String>) -> Self {
        Self {
            client,
            base_url: TRANSCRIPT_API_URL.to_string(),
            language: language.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TranscriptFetcher for AnthiagoTranscriptFetcher {
    async fn fetch(&self, video_id: &str) -> Result<String> {
        let youtube_url = youtube_url(video_id);
        let request_url = transcript_request_url(&self.base_url, &youtube_url, &self.language);

        tracing::info!(youtube_url = %youtube_url, "YouTube URL");
        tracing::info!(request_url = %request_url, "Transcript request URL");

        let request_failed = |e: reqwest::Error| VidquizError::TranscriptRequest {
            video_id: video_id.to_string(),
            youtube_url: youtube_url.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(&request_url)
            .header(REFERER, TRANSCRIPT_REFERER)
            .header(USER_AGENT, TRANSCRIPT_USER_AGENT)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status_code = status.as_u16(),
                request_url = %request_url,
                error_body = %preview(&error_body, LOG_PREVIEW_CHARS),
                "Transcript API returned error status"
            );
            return Err(VidquizError::TranscriptStatus {
                video_id: video_id.to_string(),
                youtube_url,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        // The API answers with plain text, never JSON.
        let bytes = response.bytes().await.map_err(request_failed)?;
        let transcript = String::from_utf8_lossy(&bytes).into_owned();

        tracing::info!(
            raw = %preview(&transcript, LOG_PREVIEW_CHARS),
            len = transcript.len(),
            "Raw transcript response"
        );

        tracing::info!("Content data retrieved successfully");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn transcript_query(video_id: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("get_video".into(), youtube_url(video_id)),
            Matcher::UrlEncoded("codeL".into(), "en".into()),
        ])
    }

    fn fetcher_for(server: &Server) -> AnthiagoTranscriptFetcher {
        AnthiagoTranscriptFetcher::new(reqwest::Client::new(), "en")
            .with_base_url(format!("{}/transcript", server.url()))
    }

    #[test]
    fn test_request_url_encodes_video_url() {
        let url = transcript_request_url(
            TRANSCRIPT_API_URL,
            &youtube_url("qn4dMXyUn1Q"),
            "en",
        );
        assert_eq!(
            url,
            "https://apiv2.anthiago.com/transcript?get_video=https%3A//www.youtube.com/qn4dMXyUn1Q&codeL=en"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/transcript")
            .match_query(transcript_query("abc123"))
            .match_header("referer", TRANSCRIPT_REFERER)
            .match_header("user-agent", TRANSCRIPT_USER_AGENT)
            .with_status(200)
            .with_body("Hello world.")
            .create_async()
            .await;

        let result = fetcher_for(&server).fetch("abc123").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "Hello world.");
    }

    #[tokio::test]
    async fn test_fetch_does_not_parse_json_bodies() {
        let mut server = Server::new_async().await;
        let body = r#"{"error": "no captions"}"#;
        let _mock = server
            .mock("GET", "/transcript")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let result = fetcher_for(&server).fetch("abc123").await;
        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_not_found_maps_to_transcript_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/transcript")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let err = fetcher_for(&server).fetch("missing").await.unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.status_code(), 404);
        match err {
            VidquizError::TranscriptStatus {
                video_id,
                youtube_url,
                status,
                reason,
            } => {
                assert_eq!(video_id, "missing");
                assert_eq!(youtube_url, "https://www.youtube.com/missing");
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_is_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/transcript")
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let err = fetcher_for(&server).fetch("abc123").await.unwrap_err();
        assert!(matches!(
            err,
            VidquizError::TranscriptStatus { status: 204, .. }
        ));
    }

    #[tokio::test]
    async fn test_fetch_empty_body_is_passed_through() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/transcript")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let result = fetcher_for(&server).fetch("abc123").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn test_request_url_encodes_ids_with_reserved_chars() {
        let url = transcript_request_url("http://x/transcript", &youtube_url("a b&c"), "en");
        assert_eq!(
            url,
            "http://x/transcript?get_video=https%3A//www.youtube.com/a%20b%26c&codeL=en"
        );
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_unavailable() {
        let fetcher = AnthiagoTranscriptFetcher::new(reqwest::Client::new(), "en")
            .with_base_url("http://127.0.0.1:1/transcript");

        let err = fetcher.fetch("abc123").await.unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert!(matches!(err, VidquizError::TranscriptRequest { .. }));
        assert!(err.to_string().starts_with("Transcript API request failed: "));
    }
}
