use super::SelectedFile;
use crate::error::GuideError;
use serde::Serialize;
use uuid::Uuid;

/// Everything one generation attempt needs, captured when the trigger fires.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub id: Uuid,
    pub file: SelectedFile,
    pub instructions: String,
}

impl GenerationRequest {
    pub fn new(file: SelectedFile, instructions: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            instructions: instructions.into().trim().to_string(),
        }
    }
}

/// Values the remote service hands back while a chain runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadSession {
    pub upload_url: Option<String>,
    pub file_uri: Option<String>,
}

/// The generated guide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guide {
    pub text: String,
    pub file_uri: String,
}

pub type GenerationOutcome = std::result::Result<Guide, GuideError>;
