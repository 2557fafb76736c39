use super::{presenter, TriggerState, ViewState};
use crate::error::{GuideError, INVALID_FILE_MESSAGE};
use crate::models::SelectedFile;

/// Accepts the first offered file if its declared type is `video/*`.
///
/// Rejections only touch the result panel; a previously accepted file stays
/// selected.
pub fn handle_files(view: &mut ViewState, files: &[SelectedFile]) {
    let Some(file) = files.first() else {
        return;
    };

    if files.len() > 1 {
        log::warn!(
            "{} files offered, only {} is used",
            files.len(),
            file.name
        );
    }

    if !file.is_video() {
        log::warn!("Rejected {} ({})", file.name, file.mime_type);
        presenter::show_error(
            view,
            &GuideError::InvalidSelection(INVALID_FILE_MESSAGE.to_string()),
        );
        return;
    }

    log::info!("📁 Selected {} ({} bytes)", file.name, file.size());
    view.drop_zone.label = Some(format!("Selected file: {}", file.name));
    view.selected = Some(file.clone());

    if view.trigger != TriggerState::Busy {
        view.trigger = TriggerState::Enabled;
    }
}
