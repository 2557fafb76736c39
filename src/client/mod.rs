pub mod orchestrator;
pub mod traits;
pub mod transfer_client;
pub mod webhook_client;

use crate::{
    config::GuideConfig,
    error::{GuideError, Result},
    models::{AnalysisRequest, SelectedFile, UploadSlotRequest},
};
use async_trait::async_trait;
use reqwest::Client;

pub use orchestrator::Orchestrator;
pub use traits::GuideBackend;
pub use transfer_client::TransferClient;
pub use webhook_client::WebhookClient;

/// The real backend: one shared `reqwest::Client` behind both sub-clients.
#[derive(Clone)]
pub struct HttpBackend {
    webhook_client: WebhookClient,
    transfer_client: TransferClient,
}

impl HttpBackend {
    pub fn new(config: &GuideConfig) -> Result<Self> {
        config.validate()?;

        let webhook_url = config
            .webhook_url
            .clone()
            .ok_or_else(|| GuideError::ConfigError("Webhook URL is required".into()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            log::info!("Request timeout set to {:?}", timeout);
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GuideError::ConfigError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            webhook_client: WebhookClient::new(client.clone(), webhook_url),
            transfer_client: TransferClient::new(client),
        })
    }

    pub fn webhook(&self) -> &WebhookClient {
        &self.webhook_client
    }

    pub fn transfer(&self) -> &TransferClient {
        &self.transfer_client
    }
}

#[async_trait]
impl GuideBackend for HttpBackend {
    async fn request_upload_slot(&self, request: &UploadSlotRequest) -> Result<String> {
        self.webhook_client.request_upload_slot(request).await
    }

    async fn transfer_file(&self, upload_url: &str, file: &SelectedFile) -> Result<String> {
        self.transfer_client.transfer(upload_url, file).await
    }

    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String> {
        self.webhook_client.request_analysis(request).await
    }
}
