pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod ui;

pub use client::{GuideBackend, HttpBackend, Orchestrator};
pub use config::GuideConfig;
pub use error::{ErrorKind, GuideError, Result};
pub use models::*;
pub use ui::{Effect, EventKind, EventMap, GuideApp, ResultPanel, TriggerState, UiEvent, ViewState};
