//! Builder y montaje del wizard.
//!
//! El montaje es el único punto donde el wizard puede fallar por
//! configuración o por una página incompleta. En ese caso la vista recibe el
//! banner fatal y no se construye ninguna instancia.

use log::{error, info};

use crate::api::ChallengeApi;
use crate::constants::{FATAL_INIT_MESSAGE, REQUIRED_VIEW_ELEMENTS};
use crate::engine::{ChallengeWizard, WizardConfig};
use crate::errors::CoreWizardError;
use crate::event::{EventStore, InMemoryEventStore, WizardEventKind};
use crate::step::StepPlan;
use crate::store::DraftStore;
use crate::view::WizardView;

#[derive(Debug)]
pub struct WizardBuilder<S, A, V, E = InMemoryEventStore>
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView,
          E: EventStore
{
    config: WizardConfig,
    store: S,
    api: A,
    view: V,
    events: E,
    plan: StepPlan,
}

impl<S, A, V> WizardBuilder<S, A, V, InMemoryEventStore>
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView
{
    pub fn new(config: WizardConfig, store: S, api: A, view: V) -> Self {
        Self { config,
               store,
               api,
               view,
               events: InMemoryEventStore::default(),
               plan: StepPlan::standard() }
    }
}

impl<S, A, V, E> WizardBuilder<S, A, V, E>
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView,
          E: EventStore
{
    /// Reemplaza la bitácora de eventos.
    pub fn with_event_store<E2: EventStore>(self, events: E2) -> WizardBuilder<S, A, V, E2> {
        WizardBuilder { config: self.config,
                        store: self.store,
                        api: self.api,
                        view: self.view,
                        events,
                        plan: self.plan }
    }

    pub fn with_plan(mut self, plan: StepPlan) -> Self {
        self.plan = plan;
        self
    }

    fn preflight(&self) -> Result<(), CoreWizardError> {
        self.config.validate()?;
        let missing: Vec<String> = REQUIRED_VIEW_ELEMENTS.iter()
                                                         .filter(|sel| !self.view.has_element(sel))
                                                         .map(|sel| sel.to_string())
                                                         .collect();
        if !missing.is_empty() {
            return Err(CoreWizardError::MissingElements(missing));
        }
        Ok(())
    }

    /// Verifica configuración y vista, construye el wizard y restaura el
    /// draft guardado (si lo hay).
    pub fn mount(mut self) -> Result<ChallengeWizard<S, A, V, E>, CoreWizardError> {
        if let Err(e) = self.preflight() {
            error!("challenge wizard initialization failed: {e}");
            self.view.show_fatal_banner(FATAL_INIT_MESSAGE);
            return Err(e);
        }
        let mut wizard = ChallengeWizard::assemble(self.config, self.plan, self.store, self.api, self.view, self.events);
        let step = wizard.current_step().number();
        wizard.record(WizardEventKind::WizardMounted { step });
        wizard.restore()?;
        info!("challenge wizard mounted session={} product={}",
              wizard.session_id(),
              wizard.config().product_slug);
        Ok(wizard)
    }
}
