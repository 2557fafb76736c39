use super::{presenter, Effect, EventMap, UiEvent, ViewState};
use crate::client::{GuideBackend, Orchestrator};
use crate::config::GuideConfig;
use std::sync::Arc;

/// Glue between the event map, the view state and the orchestrator.
///
/// Front-ends feed it [`UiEvent`]s and get back the effects only they can
/// perform (opening a file picker). Generation effects are run here.
pub struct GuideApp {
    view: ViewState,
    events: EventMap,
    orchestrator: Arc<Orchestrator>,
}

impl GuideApp {
    pub fn new(backend: Arc<dyn GuideBackend>, config: GuideConfig) -> Self {
        Self::with_orchestrator(Arc::new(Orchestrator::new(backend, config)))
    }

    pub fn with_orchestrator(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            view: ViewState::new(),
            events: EventMap::standard(),
            orchestrator,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub async fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        let effects = self.events.dispatch(&mut self.view, &event);
        let mut pending = Vec::new();

        for effect in effects {
            match effect {
                Effect::Generate(request) => {
                    let outcome = self.orchestrator.generate(&request).await;
                    presenter::present(&mut self.view, &outcome);
                }
                other => pending.push(other),
            }
        }

        pending
    }
}
