use crate::{
    error::{GuideError, Result},
    models::{
        AnalysisRequest, AnalysisResult, Step, UploadSlotRequest, UploadSlotResult,
        WebhookEnvelope,
    },
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// Client for the action-based webhook (steps 1 and 3).
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request_upload_slot(&self, request: &UploadSlotRequest) -> Result<String> {
        let step = Step::RequestUploadSlot;
        let raw = self.post(step, request).await?;
        let envelope: WebhookEnvelope<UploadSlotResult> = parse_body(step, &raw)?;

        if !envelope.is_success() {
            return Err(GuideError::Rejected { step, raw });
        }

        envelope
            .into_first()
            .and_then(|result| result.upload_url)
            .filter(|url| !url.is_empty())
            .ok_or(GuideError::IncompleteResponse {
                step,
                field: "results[0].upload_url",
                raw,
            })
    }

    pub async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String> {
        let step = Step::RequestAnalysis;
        let raw = self.post(step, request).await?;
        let envelope: WebhookEnvelope<AnalysisResult> = parse_body(step, &raw)?;

        if !envelope.is_success() {
            return Err(GuideError::Rejected { step, raw });
        }

        envelope
            .into_first()
            .and_then(|result| result.gemini_response)
            .ok_or(GuideError::IncompleteResponse {
                step,
                field: "results[0].gemini_response",
                raw,
            })
    }

    async fn post<B: Serialize + ?Sized>(&self, step: Step, body: &B) -> Result<String> {
        log::debug!(
            "POST {} for {}: {}",
            self.url,
            step,
            serde_json::to_string(body).unwrap_or_default()
        );

        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(|e| network_failure(step, e))?;

        read_body(step, response).await
    }
}

/// Reads the whole body; the status code is only logged.
pub(crate) async fn read_body(step: Step, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        log::warn!("{} answered with HTTP {}", step, status);
    }

    let raw = response
        .text()
        .await
        .map_err(|e| network_failure(step, e))?;

    log::debug!("{} raw response: {}", step, raw);
    Ok(raw)
}

pub(crate) fn parse_body<T: DeserializeOwned>(step: Step, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| GuideError::MalformedResponse {
        step,
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

pub(crate) fn network_failure(step: Step, error: reqwest::Error) -> GuideError {
    log::error!("{} failed: {:?}", step, error);

    let reason = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else {
        error.to_string()
    };
    GuideError::NetworkFailure { step, reason }
}
