use crate::error::{GuideError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_PROMPT_PREAMBLE: &str =
    "Analyze this video and generate a detailed instruction guide.";

#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub webhook_url: Option<String>,
    pub prompt_preamble: String,
    pub request_timeout: Option<Duration>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        GuideConfig {
            webhook_url: None,
            prompt_preamble: DEFAULT_PROMPT_PREAMBLE.to_string(),
            request_timeout: None,
        }
    }
}

impl GuideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let webhook_url = env::var("GUIDE_WEBHOOK_URL").ok().filter(|s| !s.is_empty());
        let prompt_preamble = env::var("GUIDE_PROMPT_PREAMBLE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROMPT_PREAMBLE.to_string());
        let request_timeout = env::var("GUIDE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        GuideConfig {
            webhook_url,
            prompt_preamble,
            request_timeout,
        }
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_prompt_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.prompt_preamble = preamble.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| GuideError::ConfigError("Webhook URL is required".into()))?;

        reqwest::Url::parse(url).map_err(|e| {
            GuideError::ConfigError(format!("Invalid webhook URL '{}': {}", url, e))
        })?;

        Ok(())
    }

    /// Fixed preamble followed by the user's (trimmed) instructions.
    pub fn compose_prompt(&self, instructions: &str) -> String {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            self.prompt_preamble.clone()
        } else {
            format!("{} {}", self.prompt_preamble, instructions)
        }
    }
}
