use serde::{Deserialize, Serialize};
use std::fmt;

/// The three remote calls of a generation attempt, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    RequestUploadSlot,
    TransferFile,
    RequestAnalysis,
}

impl Step {
    pub const ALL: [Step; 3] = [
        Step::RequestUploadSlot,
        Step::TransferFile,
        Step::RequestAnalysis,
    ];

    /// 1-based position in the chain.
    pub fn number(&self) -> usize {
        match self {
            Step::RequestUploadSlot => 1,
            Step::TransferFile => 2,
            Step::RequestAnalysis => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::RequestUploadSlot => "request upload slot",
            Step::TransferFile => "transfer file",
            Step::RequestAnalysis => "request analysis",
        }
    }

    /// Message shown to the user when this step fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Step::RequestUploadSlot => "Error while uploading the file",
            Step::TransferFile => "Error while sending the video",
            Step::RequestAnalysis => "Error while analyzing the video",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.as_str())
    }
}
