use crate::models::Step;
use thiserror::Error;

pub const INVALID_FILE_MESSAGE: &str = "Please select a valid video file.";

#[derive(Debug, Error)]
pub enum GuideError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Malformed response at {step}: {reason}")]
    MalformedResponse {
        step: Step,
        reason: String,
        raw: String,
    },

    #[error("Incomplete response at {step}: missing `{field}`")]
    IncompleteResponse {
        step: Step,
        field: &'static str,
        raw: String,
    },

    #[error("Service reported a failure at {step}")]
    Rejected { step: Step, raw: String },

    #[error("Network error at {step}: {reason}")]
    NetworkFailure { step: Step, reason: String },

    #[error("A generation is already in progress")]
    Busy,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used by front-ends and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSelection,
    MalformedResponse,
    IncompleteResponse,
    NetworkFailure,
    Busy,
    Config,
    Io,
}

impl GuideError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuideError::InvalidSelection(_) => ErrorKind::InvalidSelection,
            GuideError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            // `success` is a required field like any other
            GuideError::IncompleteResponse { .. } | GuideError::Rejected { .. } => {
                ErrorKind::IncompleteResponse
            }
            GuideError::NetworkFailure { .. } => ErrorKind::NetworkFailure,
            GuideError::Busy => ErrorKind::Busy,
            GuideError::ConfigError(_) => ErrorKind::Config,
            GuideError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            GuideError::MalformedResponse { step, .. }
            | GuideError::IncompleteResponse { step, .. }
            | GuideError::Rejected { step, .. }
            | GuideError::NetworkFailure { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            GuideError::MalformedResponse { raw, .. }
            | GuideError::IncompleteResponse { raw, .. }
            | GuideError::Rejected { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// The headline shown in the result panel.
    pub fn user_message(&self) -> String {
        match self {
            GuideError::InvalidSelection(msg) => msg.clone(),
            GuideError::Busy => "A guide is already being generated, please wait.".to_string(),
            GuideError::ConfigError(msg) => format!("The application is misconfigured: {}", msg),
            GuideError::Io(e) => format!("Could not read the file: {}", e),
            other => match other.step() {
                Some(step) => step.failure_message().to_string(),
                None => other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GuideError>;
