use crate::{
    error::Result,
    models::{AnalysisRequest, SelectedFile, UploadSlotRequest},
};
use async_trait::async_trait;

/// The three remote calls a generation attempt is made of.
///
/// Each method performs exactly one request and turns its answer into the one
/// value the next step needs, or an error tagged with its step.
#[async_trait]
pub trait GuideBackend: Send + Sync {
    /// Returns the upload URL.
    async fn request_upload_slot(&self, request: &UploadSlotRequest) -> Result<String>;

    /// Returns the URI of the stored file.
    async fn transfer_file(&self, upload_url: &str, file: &SelectedFile) -> Result<String>;

    /// Returns the generated guide text.
    async fn request_analysis(&self, request: &AnalysisRequest) -> Result<String>;
}
