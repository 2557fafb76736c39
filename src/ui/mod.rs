pub mod app;
pub mod events;
pub mod presenter;
pub mod selection;
pub mod view;

pub use app::GuideApp;
pub use events::{Effect, EventKind, EventMap, Handler, UiEvent};
pub use view::{DropZone, ErrorBlock, ResultPanel, TriggerState, ViewState};
