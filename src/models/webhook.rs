use serde::{Deserialize, Serialize};

pub const ACTION_FILE_UPLOAD: &str = "GEMINI_FILE_UPLOAD";
pub const ACTION_FILE_ANALYZE: &str = "GEMINI_FILE_ANALYZE";

/// Body of step 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadSlotRequest {
    pub action: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl UploadSlotRequest {
    pub fn new(file_size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            action: ACTION_FILE_UPLOAD.to_string(),
            file_size,
            mime_type: mime_type.into(),
        }
    }
}

/// Body of step 3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub action: String,
    pub prompt: String,
    pub uri: String,
}

impl AnalysisRequest {
    pub fn new(prompt: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            action: ACTION_FILE_ANALYZE.to_string(),
            prompt: prompt.into(),
            uri: uri.into(),
        }
    }
}

/// Envelope the webhook wraps every answer in.
///
/// Fields are lenient so that a parseable body with missing pieces is told
/// apart from a body that is not JSON at all.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope<T> {
    pub success: Option<bool>,
    pub results: Option<Vec<Option<T>>>,
}

impl<T> WebhookEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    pub fn into_first(self) -> Option<T> {
        self.results?.into_iter().next().flatten()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSlotResult {
    #[serde(default)]
    pub upload_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub gemini_response: Option<String>,
}

/// Answer of the blob-storage endpoint in step 2.
#[derive(Debug, Clone, Deserialize)]
pub struct FileTransferResponse {
    #[serde(default)]
    pub file: Option<TransferredFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferredFile {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}
