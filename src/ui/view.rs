use crate::error::GuideError;
use crate::models::{SelectedFile, Step};
use serde::Serialize;

/// The generate button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerState {
    Disabled,
    Enabled,
    /// Disabled and showing a loading indicator.
    Busy,
}

impl TriggerState {
    pub fn is_clickable(&self) -> bool {
        matches!(self, TriggerState::Enabled)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TriggerState::Busy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropZone {
    pub highlighted: bool,
    /// "Selected file: ..." line under the zone. At most one.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBlock {
    pub message: String,
    pub step: Option<Step>,
    pub detail: Option<String>,
    pub raw_response: Option<String>,
}

impl From<&GuideError> for ErrorBlock {
    fn from(error: &GuideError) -> Self {
        let step = error.step();
        Self {
            message: error.user_message(),
            step,
            // the headline already says everything for step-less errors
            detail: step.map(|_| error.to_string()),
            raw_response: error.raw_response().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ResultPanel {
    Hidden,
    Guide { text: String, notice: String },
    Error(ErrorBlock),
}

impl ResultPanel {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultPanel::Hidden)
    }

    pub fn guide_text(&self) -> Option<&str> {
        match self {
            ResultPanel::Guide { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorBlock> {
        match self {
            ResultPanel::Error(block) => Some(block),
            _ => None,
        }
    }
}

/// Every widget the handlers read or write, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub drop_zone: DropZone,
    pub trigger: TriggerState,
    pub instructions: String,
    pub selected: Option<SelectedFile>,
    pub result: ResultPanel,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            drop_zone: DropZone::default(),
            trigger: TriggerState::Disabled,
            instructions: String::new(),
            selected: None,
            result: ResultPanel::Hidden,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}
