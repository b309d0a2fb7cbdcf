use crate::error::VidquizError;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const TRANSCRIPT_LANGUAGE_ENV: &str = "TRANSCRIPT_LANGUAGE";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TRANSCRIPT_LANGUAGE: &str = "en";

/// Process-wide settings, read once and handed to the orchestrator.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub transcript_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            transcript_language: DEFAULT_TRANSCRIPT_LANGUAGE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_ENV),
            model: get(MODEL_ENV).unwrap_or(defaults.model),
            transcript_language: get(TRANSCRIPT_LANGUAGE_ENV)
                .unwrap_or(defaults.transcript_language),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Validate that the API key is set
    pub fn require_api_key(&self) -> Result<&str, VidquizError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| VidquizError::MissingApiKey {
                env_var: API_KEY_ENV.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));

        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.transcript_language, DEFAULT_TRANSCRIPT_LANGUAGE);
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (API_KEY_ENV, "secret"),
            (MODEL_ENV, "gemini-2.5-pro"),
            (TRANSCRIPT_LANGUAGE_ENV, "hi"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.transcript_language, "hi");
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = Config::from_lookup(lookup_from(&[(API_KEY_ENV, "  ")]));
        let err = config.require_api_key().unwrap_err();

        assert_eq!(err.to_string(), "GEMINI_API_KEY environment variable not set");
        assert_eq!(err.status_code(), 400);
    }
}
