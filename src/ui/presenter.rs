use super::{ErrorBlock, ResultPanel, TriggerState, ViewState};
use crate::error::GuideError;
use crate::models::{GenerationOutcome, Guide};
use colored::*;

pub const SUCCESS_NOTICE: &str = "Instructions generated successfully!";

pub fn show_error(view: &mut ViewState, error: &GuideError) {
    view.result = ResultPanel::Error(ErrorBlock::from(error));
}

pub fn show_guide(view: &mut ViewState, guide: &Guide) {
    view.result = ResultPanel::Guide {
        text: guide.text.clone(),
        notice: SUCCESS_NOTICE.to_string(),
    };
}

/// Writes the outcome of an attempt and hands the trigger back.
pub fn present(view: &mut ViewState, outcome: &GenerationOutcome) {
    match outcome {
        Ok(guide) => show_guide(view, guide),
        Err(error) => {
            log::error!("Generation failed: {}", error);
            show_error(view, error);
        }
    }
    finish(view);
}

pub fn finish(view: &mut ViewState) {
    view.trigger = TriggerState::Enabled;
}

/// Terminal rendering of the result panel.
pub fn render(panel: &ResultPanel, colors: bool) -> String {
    match panel {
        ResultPanel::Hidden => String::new(),
        ResultPanel::Guide { text, notice } => {
            if colors {
                format!("{}\n\n{}", text, notice.green().bold())
            } else {
                format!("{}\n\n{}", text, notice)
            }
        }
        ResultPanel::Error(block) => {
            let mut out = if colors {
                block.message.red().bold().to_string()
            } else {
                block.message.clone()
            };
            if let Some(step) = block.step {
                out.push_str(&format!("\n  step: {}", step.as_str()));
            }
            if let Some(detail) = &block.detail {
                out.push_str(&format!("\n  detail: {}", detail));
            }
            if let Some(raw) = &block.raw_response {
                out.push_str(&format!("\n  response: {}", raw));
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Step;

    #[test]
    fn test_success_is_verbatim() {
        let mut view = ViewState {
            trigger: TriggerState::Busy,
            ..Default::default()
        };
        let text = "  1. Remove the cover\n2. <b>Pull</b> the lever  ";
        present(
            &mut view,
            &Ok(Guide {
                text: text.to_string(),
                file_uri: "files/1".to_string(),
            }),
        );

        assert_eq!(view.result.guide_text(), Some(text));
        assert_eq!(view.trigger, TriggerState::Enabled);
    }

    #[test]
    fn test_error_carries_diagnostics() {
        let mut view = ViewState {
            trigger: TriggerState::Busy,
            ..Default::default()
        };
        present(
            &mut view,
            &Err(GuideError::MalformedResponse {
                step: Step::TransferFile,
                reason: "expected value at line 1 column 1".into(),
                raw: "<html>".into(),
            }),
        );

        let block = view.result.error().unwrap();
        assert_eq!(block.message, "Error while sending the video");
        assert_eq!(block.step, Some(Step::TransferFile));
        assert_eq!(block.raw_response.as_deref(), Some("<html>"));
        assert_eq!(view.trigger, TriggerState::Enabled);

        let rendered = render(&view.result, false);
        assert!(rendered.contains("step: transfer file"));
        assert!(rendered.contains("response: <html>"));
    }

    #[test]
    fn test_render_plain_guide() {
        let panel = ResultPanel::Guide {
            text: "Do it.".into(),
            notice: SUCCESS_NOTICE.into(),
        };
        assert_eq!(
            render(&panel, false),
            "Do it.\n\nInstructions generated successfully!"
        );
        assert_eq!(render(&ResultPanel::Hidden, false), "");
    }
}
