use super::{presenter, selection, TriggerState, ViewState};
use crate::error::GuideError;
use crate::models::{GenerationRequest, SelectedFile};
use std::collections::HashMap;

pub const NO_FILE_MESSAGE: &str = "Please select a video.";

#[derive(Debug, Clone)]
pub enum UiEvent {
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<SelectedFile>),
    DropZoneClick,
    FilesPicked(Vec<SelectedFile>),
    InstructionsChanged(String),
    GenerateClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    DropZoneClick,
    FilesPicked,
    InstructionsChanged,
    GenerateClicked,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::DragEnter => EventKind::DragEnter,
            UiEvent::DragOver => EventKind::DragOver,
            UiEvent::DragLeave => EventKind::DragLeave,
            UiEvent::Drop(_) => EventKind::Drop,
            UiEvent::DropZoneClick => EventKind::DropZoneClick,
            UiEvent::FilesPicked(_) => EventKind::FilesPicked,
            UiEvent::InstructionsChanged(_) => EventKind::InstructionsChanged,
            UiEvent::GenerateClicked => EventKind::GenerateClicked,
        }
    }
}

/// Work a handler asks the front-end to carry out.
#[derive(Debug, Clone)]
pub enum Effect {
    OpenFilePicker,
    Generate(GenerationRequest),
}

pub type Handler = fn(&mut ViewState, &UiEvent) -> Option<Effect>;

/// Which handlers run for which event, fixed at start-up.
pub struct EventMap {
    routes: HashMap<EventKind, Vec<Handler>>,
}

impl Default for EventMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl EventMap {
    pub fn empty() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    pub fn on(mut self, kind: EventKind, handler: Handler) -> Self {
        self.routes.entry(kind).or_default().push(handler);
        self
    }

    pub fn standard() -> Self {
        Self::empty()
            .on(EventKind::DragEnter, highlight)
            .on(EventKind::DragOver, highlight)
            .on(EventKind::DragLeave, unhighlight)
            .on(EventKind::Drop, unhighlight)
            .on(EventKind::Drop, accept_files)
            .on(EventKind::DropZoneClick, open_picker)
            .on(EventKind::FilesPicked, accept_files)
            .on(EventKind::InstructionsChanged, update_instructions)
            .on(EventKind::GenerateClicked, start_generation)
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }

    /// Runs the handlers for `event` in registration order.
    pub fn dispatch(&self, view: &mut ViewState, event: &UiEvent) -> Vec<Effect> {
        let Some(handlers) = self.routes.get(&event.kind()) else {
            log::trace!("No handler for {:?}", event.kind());
            return Vec::new();
        };

        handlers
            .iter()
            .filter_map(|handler| handler(view, event))
            .collect()
    }
}

fn highlight(view: &mut ViewState, _event: &UiEvent) -> Option<Effect> {
    view.drop_zone.highlighted = true;
    None
}

fn unhighlight(view: &mut ViewState, _event: &UiEvent) -> Option<Effect> {
    view.drop_zone.highlighted = false;
    None
}

fn open_picker(_view: &mut ViewState, _event: &UiEvent) -> Option<Effect> {
    Some(Effect::OpenFilePicker)
}

fn accept_files(view: &mut ViewState, event: &UiEvent) -> Option<Effect> {
    if let UiEvent::Drop(files) | UiEvent::FilesPicked(files) = event {
        selection::handle_files(view, files);
    }
    None
}

fn update_instructions(view: &mut ViewState, event: &UiEvent) -> Option<Effect> {
    if let UiEvent::InstructionsChanged(text) = event {
        view.instructions = text.clone();
    }
    None
}

fn start_generation(view: &mut ViewState, _event: &UiEvent) -> Option<Effect> {
    if view.trigger.is_loading() {
        log::debug!("Generate clicked while busy, ignoring");
        return None;
    }

    let Some(file) = view.selected.clone() else {
        presenter::show_error(
            view,
            &GuideError::InvalidSelection(NO_FILE_MESSAGE.to_string()),
        );
        return None;
    };

    view.trigger = TriggerState::Busy;
    Some(Effect::Generate(GenerationRequest::new(
        file,
        view.instructions.as_str(),
    )))
}
