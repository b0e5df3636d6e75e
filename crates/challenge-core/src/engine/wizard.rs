//! `ChallengeWizard`: una instancia por página de autoría.
//!
//! Todo el estado es privado. Cada acción del usuario es un método `&mut
//! self` que muta la lista/draft, re-renderiza la vista y persiste, en ese
//! orden y sin puntos intermedios observables.
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use uuid::Uuid;

use challenge_domain::{build_expertise_tree, BountyDraft, BountyId, DomainError, Expertise, FieldValue, Skill};

use crate::api::{map_server_errors, ApiError, Attachment, ChallengeApi, SubmitPayload, SubmitResponse};
use crate::bounty::{render, BountyForm, ReviewSummary};
use crate::constants::TRANSPORT_ERROR_MESSAGE;
use crate::engine::{AutosaveTimer, BountyTableMode, WizardConfig};
use crate::errors::{CoreWizardError, FieldError};
use crate::event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
use crate::lookup::{LookupGate, LookupKind, LookupTicket};
use crate::model::Draft;
use crate::persistence::{DraftPersistence, RestoreOutcome};
use crate::step::{StepContext, StepPlan, WizardStep};
use crate::store::DraftStore;
use crate::view::{NavigationState, WizardView};

/// Fase del ciclo de vida. `Submitted` es terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitting,
    Submitted,
}

/// Resultado de un envío que llegó a completarse (con o sin éxito).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// El servidor creó el challenge; el draft se borró.
    Submitted { redirect_url: String },
    /// El servidor rechazó el envío; `messages` es lo que se mostró.
    Rejected { messages: Vec<String> },
    /// Fallo de red o respuesta ilegible; no se reintenta.
    TransportFailed { message: String },
}

#[derive(Debug)]
pub struct ChallengeWizard<S, A, V, E = InMemoryEventStore>
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView,
          E: EventStore
{
    session_id: Uuid,
    config: WizardConfig,
    plan: StepPlan,
    draft: Draft,
    persistence: DraftPersistence<S>,
    api: A,
    view: V,
    events: E,
    lookups: LookupGate,
    bounty_form: BountyForm,
    skills: Vec<Skill>,
    expertise: Vec<Expertise>,
    attachments: Vec<Attachment>,
    autosave: AutosaveTimer,
    phase: WizardPhase,
}

impl<S, A, V, E> ChallengeWizard<S, A, V, E>
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView,
          E: EventStore
{
    /// Construcción sin chequeos. Usar `WizardBuilder::mount`.
    pub(crate) fn assemble(config: WizardConfig, plan: StepPlan, store: S, api: A, view: V, events: E) -> Self {
        let persistence = DraftPersistence::new(store, config.storage_key.clone());
        let autosave = AutosaveTimer::new(config.autosave_interval, Utc::now());
        Self { session_id: Uuid::new_v4(),
               config,
               plan,
               draft: Draft::new(),
               persistence,
               api,
               view,
               events,
               lookups: LookupGate::new(),
               bounty_form: BountyForm::new(),
               skills: Vec::new(),
               expertise: Vec::new(),
               attachments: Vec::new(),
               autosave,
               phase: WizardPhase::Editing }
    }

    // ------------------------------------------------------------------
    // Accesores
    // ------------------------------------------------------------------

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn current_step(&self) -> WizardStep {
        self.draft.current_step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn bounties(&self) -> &[BountyDraft] {
        self.draft.bounties.as_slice()
    }

    pub fn total_points(&self) -> u64 {
        self.draft.bounties.total_points()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn expertise(&self) -> &[Expertise] {
        &self.expertise
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn bounty_form(&self) -> &BountyForm {
        &self.bounty_form
    }

    /// Acceso al sub-formulario (título, descripción, puntos). La skill y la
    /// expertise se eligen con `select_skill` / `toggle_expertise`.
    pub fn bounty_form_mut(&mut self) -> &mut BountyForm {
        &mut self.bounty_form
    }

    pub fn events(&self) -> Vec<WizardEvent> {
        self.events.list(self.session_id)
    }

    /// Devuelve vista y store (p. ej. para reutilizar el store en otra
    /// instancia).
    pub fn into_parts(self) -> (S, V) {
        (self.persistence.into_store(), self.view)
    }

    fn ensure_editable(&self) -> Result<(), CoreWizardError> {
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(CoreWizardError::SubmissionInFlight),
            WizardPhase::Submitted => Err(CoreWizardError::AlreadySubmitted),
        }
    }

    pub(crate) fn record(&mut self, kind: WizardEventKind) {
        self.events.append_kind(self.session_id, kind);
    }

    // ------------------------------------------------------------------
    // Render
    // ------------------------------------------------------------------

    fn refresh_navigation(&mut self) {
        let step = self.draft.current_step;
        self.view.show_step(step);
        self.view.set_navigation(NavigationState::for_step(step));
    }

    fn render_summary(&mut self) {
        let summary = ReviewSummary::build(&self.draft.form_fields, self.draft.bounties.as_slice());
        let html = render::summary_html(&summary);
        self.view.render_summary(&summary, &html);
    }

    fn render_client_table(&mut self) {
        let table = self.draft.bounties.table();
        let html = render::table_rows_html(&table);
        self.view.render_bounty_table(&table, &html);
    }

    /// Re-deriva la tabla (y el resumen si estamos en revisión) a partir de
    /// la lista en memoria.
    fn render_bounties(&mut self) {
        match self.config.table_mode {
            BountyTableMode::ClientRendered => self.render_client_table(),
            BountyTableMode::ServerRendered => {
                let ticket = self.lookups.issue(LookupKind::BountyTable);
                match self.api.render_bounty_table(self.draft.bounties.as_slice()) {
                    Ok(html) => {
                        if self.lookups.accept(ticket) {
                            self.view.replace_bounty_table_html(&html);
                        }
                    }
                    Err(e) => {
                        warn!("server-rendered bounty table failed, rendering locally: {e}");
                        self.render_client_table();
                    }
                }
            }
        }
        self.view.set_bounty_area_visible(!self.draft.bounties.is_empty());
        if self.draft.current_step == WizardStep::Review {
            self.render_summary();
        }
    }

    fn render_all(&mut self) {
        let fields: Vec<(String, FieldValue)> =
            self.draft.form_fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        for (name, value) in &fields {
            self.view.set_field(name, value);
        }
        self.refresh_navigation();
        self.render_bounties();
    }

    // ------------------------------------------------------------------
    // Persistencia
    // ------------------------------------------------------------------

    /// Guardado implícito tras cada mutación. Un fallo del store se registra
    /// y no interrumpe la edición.
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!("autosave failed for key={}: {e}", self.persistence.key());
        }
    }

    /// Guarda el draft bajo la clave configurada. Idempotente.
    pub fn save(&mut self) -> Result<String, CoreWizardError> {
        self.ensure_editable()?;
        self.save_at(Utc::now())
    }

    fn save_at(&mut self, now: DateTime<Utc>) -> Result<String, CoreWizardError> {
        let fingerprint = self.persistence.save(&mut self.draft, now)?;
        self.autosave.mark(now);
        self.record(WizardEventKind::DraftSaved { fingerprint: fingerprint.clone() });
        Ok(fingerprint)
    }

    /// Autosave periódico. Devuelve `true` si guardó.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<bool, CoreWizardError> {
        if self.phase != WizardPhase::Editing || !self.autosave.is_due(now) {
            return Ok(false);
        }
        self.save_at(now)?;
        Ok(true)
    }

    /// Lee el draft guardado y lo refleja en la vista. Si no hay draft o no
    /// se puede usar, se arranca con uno vacío.
    pub fn restore(&mut self) -> Result<RestoreOutcome, CoreWizardError> {
        self.ensure_editable()?;
        let outcome = self.persistence.restore();
        match &outcome {
            RestoreOutcome::Restored(draft) => {
                self.draft = draft.clone();
                let fingerprint = self.draft.fingerprint();
                let step = self.draft.current_step.number();
                info!("draft restored key={} step={} bounties={}",
                      self.persistence.key(),
                      step,
                      self.draft.bounties.len());
                self.record(WizardEventKind::DraftRestored { fingerprint, step });
            }
            RestoreOutcome::Empty => {
                self.draft = Draft::new();
            }
            RestoreOutcome::Discarded { reason } => {
                self.draft = Draft::new();
                self.record(WizardEventKind::DraftDiscarded { reason: reason.clone() });
            }
        }
        self.render_all();
        Ok(outcome)
    }

    /// Descarta el draft: borra la clave y vuelve al paso 1 vacío.
    pub fn reset(&mut self) -> Result<(), CoreWizardError> {
        self.ensure_editable()?;
        self.persistence.clear()?;
        self.draft = Draft::new();
        self.bounty_form.clear();
        self.attachments.clear();
        self.view.clear_errors();
        self.render_all();
        self.record(WizardEventKind::DraftReset);
        info!("draft reset key={}", self.persistence.key());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Campos y navegación
    // ------------------------------------------------------------------

    /// Evento input/change de un campo del formulario principal.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), CoreWizardError> {
        self.ensure_editable()?;
        self.view.set_field(name, &value);
        self.draft.form_fields.set(name, value);
        if self.draft.current_step == WizardStep::Review {
            self.render_summary();
        }
        self.persist();
        Ok(())
    }

    fn step_context(&self) -> StepContext<'_> {
        StepContext { fields: &self.draft.form_fields,
                      bounties: self.draft.bounties.as_slice(),
                      policy: &self.config.bounty_policy }
    }

    fn validate_step(&self, step: WizardStep) -> Vec<FieldError> {
        self.plan.validate(step, &self.step_context())
    }

    /// Valida el paso activo y avanza (sin pasar de 5).
    pub fn advance(&mut self) -> Result<WizardStep, CoreWizardError> {
        self.ensure_editable()?;
        let from = self.draft.current_step;
        let errors = self.validate_step(from);
        if !errors.is_empty() {
            debug!("step {} blocked by {} error(s)", from, errors.len());
            self.view.show_field_errors(&errors);
            self.record(WizardEventKind::StepRejected { step: from.number(),
                                                        errors: errors.clone() });
            return Err(CoreWizardError::StepValidation { step: from.number(),
                                                         errors });
        }
        self.view.clear_errors();
        let to = from.next();
        if to != from {
            self.draft.current_step = to;
            self.refresh_navigation();
            if to == WizardStep::Review {
                self.render_summary();
            }
            self.persist();
            self.record(WizardEventKind::StepAdvanced { from: from.number(),
                                                        to: to.number() });
        }
        Ok(to)
    }

    /// Retrocede un paso (sin bajar de 1). Nunca valida.
    pub fn retreat(&mut self) -> Result<WizardStep, CoreWizardError> {
        self.ensure_editable()?;
        let from = self.draft.current_step;
        let to = from.previous();
        if to != from {
            self.draft.current_step = to;
            self.view.clear_errors();
            self.refresh_navigation();
            self.persist();
            self.record(WizardEventKind::StepRetreated { from: from.number(),
                                                         to: to.number() });
        }
        Ok(to)
    }

    // ------------------------------------------------------------------
    // Bounties
    // ------------------------------------------------------------------

    fn reject_bounty(&mut self, errors: Vec<FieldError>) -> CoreWizardError {
        self.view.show_field_errors(&errors);
        self.record(WizardEventKind::BountyRejected { errors: errors.clone() });
        CoreWizardError::BountyRejected { errors }
    }

    /// Agrega un bounty ya construido.
    pub fn add_bounty(&mut self, bounty: BountyDraft) -> Result<BountyId, CoreWizardError> {
        self.ensure_editable()?;
        match self.draft.bounties.add(bounty, &self.config.bounty_policy) {
            Ok(id) => {
                let position = self.draft.bounties.len() - 1;
                self.render_bounties();
                self.persist();
                self.record(WizardEventKind::BountyAdded { bounty_id: id, position });
                info!("bounty added id={id} position={position}");
                Ok(id)
            }
            Err(CoreWizardError::BountyRejected { errors }) => Err(self.reject_bounty(errors)),
            Err(e) => Err(e),
        }
    }

    /// Confirma el sub-formulario. Si se acepta, el formulario se limpia.
    pub fn submit_bounty_form(&mut self) -> Result<BountyId, CoreWizardError> {
        self.ensure_editable()?;
        let bounty = match self.bounty_form.confirm() {
            Ok(b) => b,
            Err(e) => return Err(self.reject_bounty(vec![FieldError::from(e)])),
        };
        let id = self.add_bounty(bounty)?;
        self.bounty_form.clear();
        self.expertise.clear();
        self.view.show_expertise_options(&[]);
        Ok(id)
    }

    /// Quita el bounty en la posición viva `index`.
    pub fn remove_bounty(&mut self, index: usize) -> Result<BountyDraft, CoreWizardError> {
        self.ensure_editable()?;
        let removed = self.draft.bounties.remove_at(index)?;
        self.after_removal(&removed, index);
        Ok(removed)
    }

    /// Quita un bounty por su id estable (lo que llevan los controles de la
    /// tabla).
    pub fn remove_bounty_by_id(&mut self, id: BountyId) -> Result<BountyDraft, CoreWizardError> {
        self.ensure_editable()?;
        let (index, removed) = self.draft.bounties.remove_by_id(id)?;
        self.after_removal(&removed, index);
        Ok(removed)
    }

    fn after_removal(&mut self, removed: &BountyDraft, position: usize) {
        self.render_bounties();
        self.persist();
        self.record(WizardEventKind::BountyRemoved { bounty_id: removed.id(),
                                                     position });
        info!("bounty removed id={} position={position}", removed.id());
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn begin_skills_lookup(&mut self) -> LookupTicket {
        self.lookups.issue(LookupKind::Skills)
    }

    /// Aplica la respuesta de skills si el ticket sigue vigente. Devuelve
    /// `Ok(false)` si se descartó por tardía.
    pub fn apply_skills_lookup(&mut self,
                               ticket: LookupTicket,
                               result: Result<Vec<Skill>, ApiError>)
                               -> Result<bool, CoreWizardError> {
        if !self.accept_lookup(ticket) {
            return Ok(false);
        }
        let skills = match result {
            Ok(skills) => skills,
            Err(e) => return Err(self.lookup_failed(LookupKind::Skills, e)),
        };
        self.view.show_skills(&skills);
        self.skills = skills;
        Ok(true)
    }

    pub fn load_skills(&mut self) -> Result<usize, CoreWizardError> {
        let ticket = self.begin_skills_lookup();
        let result = self.api.list_skills();
        self.apply_skills_lookup(ticket, result)?;
        Ok(self.skills.len())
    }

    pub fn begin_expertise_lookup(&mut self) -> LookupTicket {
        self.lookups.issue(LookupKind::Expertise)
    }

    pub fn apply_expertise_lookup(&mut self,
                                  ticket: LookupTicket,
                                  result: Result<Vec<Expertise>, ApiError>)
                                  -> Result<bool, CoreWizardError> {
        if !self.accept_lookup(ticket) {
            return Ok(false);
        }
        let expertise = match result {
            Ok(expertise) => expertise,
            Err(e) => {
                self.expertise.clear();
                self.view.show_expertise_options(&[]);
                return Err(self.lookup_failed(LookupKind::Expertise, e));
            }
        };
        let tree = build_expertise_tree(&expertise);
        self.view.show_expertise_options(&tree);
        self.expertise = expertise;
        Ok(true)
    }

    /// Un lookup fallido no bloquea la edición: aviso genérico y evento.
    fn lookup_failed(&mut self, kind: LookupKind, error: ApiError) -> CoreWizardError {
        warn!("{kind} lookup failed: {error}");
        self.view.show_notice(TRANSPORT_ERROR_MESSAGE);
        self.record(WizardEventKind::LookupFailed { lookup: kind.to_string(),
                                                    error: error.to_string() });
        CoreWizardError::Api(error)
    }

    fn accept_lookup(&mut self, ticket: LookupTicket) -> bool {
        if self.lookups.accept(ticket) {
            return true;
        }
        self.record(WizardEventKind::StaleLookupDropped { lookup: ticket.kind.to_string(),
                                                          generation: ticket.generation });
        false
    }

    /// Elige la skill del sub-formulario y carga sus expertise.
    pub fn select_skill(&mut self, skill_id: i64) -> Result<usize, CoreWizardError> {
        self.ensure_editable()?;
        let skill = self.skills
                        .iter()
                        .find(|s| s.id == skill_id)
                        .cloned()
                        .ok_or_else(|| DomainError::ValidationError(format!("unknown skill {skill_id}")))?;
        self.bounty_form.select_skill(&skill);
        // las expertise de la skill anterior dejan de ser elegibles
        self.expertise.clear();
        self.view.show_expertise_options(&[]);
        let ticket = self.begin_expertise_lookup();
        let result = self.api.list_expertise(&[skill_id]);
        self.apply_expertise_lookup(ticket, result)?;
        Ok(self.expertise.len())
    }

    /// Marca o desmarca una expertise cargada. Devuelve `true` si quedó
    /// marcada.
    pub fn toggle_expertise(&mut self, expertise_id: i64) -> Result<bool, CoreWizardError> {
        self.ensure_editable()?;
        let expertise = self.expertise
                            .iter()
                            .find(|e| e.id == expertise_id)
                            .cloned()
                            .ok_or_else(|| DomainError::ValidationError(format!("unknown expertise {expertise_id}")))?;
        Ok(self.bounty_form.toggle_expertise(&expertise))
    }

    // ------------------------------------------------------------------
    // Adjuntos
    // ------------------------------------------------------------------

    /// Adjunta un archivo; reemplaza el anterior del mismo campo.
    pub fn attach_file(&mut self, attachment: Attachment) -> Result<(), CoreWizardError> {
        self.ensure_editable()?;
        self.attachments.retain(|a| a.field_name != attachment.field_name);
        self.attachments.push(attachment);
        Ok(())
    }

    pub fn remove_attachment(&mut self, field_name: &str) -> Result<Option<Attachment>, CoreWizardError> {
        self.ensure_editable()?;
        let removed = self.attachments
                          .iter()
                          .position(|a| a.field_name == field_name)
                          .map(|pos| self.attachments.remove(pos));
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Envío
    // ------------------------------------------------------------------

    /// Payload que se enviaría con el estado actual.
    pub fn build_payload(&self) -> SubmitPayload {
        SubmitPayload::build(&self.draft.form_fields,
                             self.draft.bounties.as_slice(),
                             &self.attachments,
                             &self.config.csrf_token)
    }

    /// Primera mitad del envío: controles, marca de envío en curso y
    /// payload.
    pub fn begin_submission(&mut self) -> Result<SubmitPayload, CoreWizardError> {
        self.ensure_editable()?;
        let step = self.draft.current_step;
        if step != WizardStep::Review {
            return Err(CoreWizardError::NotOnReviewStep);
        }
        let errors = self.validate_step(step);
        if !errors.is_empty() {
            self.view.show_field_errors(&errors);
            self.record(WizardEventKind::StepRejected { step: step.number(),
                                                        errors: errors.clone() });
            return Err(CoreWizardError::StepValidation { step: step.number(),
                                                         errors });
        }
        self.phase = WizardPhase::Submitting;
        self.view.clear_errors();
        let payload = self.build_payload();
        self.record(WizardEventKind::SubmissionStarted { bounty_count: payload.bounty_count() });
        info!("submitting challenge for product={} bounties={}",
              self.config.product_slug,
              payload.bounty_count());
        Ok(payload)
    }

    /// Segunda mitad del envío: aplica la respuesta del servidor.
    pub fn finish_submission(&mut self,
                             result: Result<SubmitResponse, ApiError>)
                             -> Result<SubmitOutcome, CoreWizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(CoreWizardError::NoSubmissionInFlight);
        }
        let outcome = match result {
            Ok(SubmitResponse::Success { redirect_url }) => {
                if let Err(e) = self.persistence.clear() {
                    error!("challenge created but draft key={} could not be cleared: {e}",
                           self.persistence.key());
                }
                self.phase = WizardPhase::Submitted;
                self.record(WizardEventKind::SubmissionSucceeded { redirect_url: redirect_url.clone() });
                self.view.navigate(&redirect_url);
                info!("challenge submitted, redirecting to {redirect_url}");
                SubmitOutcome::Submitted { redirect_url }
            }
            Ok(SubmitResponse::Error { errors }) => {
                let view = &self.view;
                let shown = map_server_errors(&errors, |field| view.has_error_slot(field));
                self.view.show_messages(&shown);
                self.phase = WizardPhase::Editing;
                self.record(WizardEventKind::SubmissionRejected { messages: shown.len() });
                warn!("submission rejected with {} error entr(ies)", shown.len());
                SubmitOutcome::Rejected { messages: shown.into_iter().map(|d| d.message).collect() }
            }
            Err(e) => {
                self.view.show_notice(TRANSPORT_ERROR_MESSAGE);
                self.phase = WizardPhase::Editing;
                self.record(WizardEventKind::SubmissionFailed { error: e.to_string() });
                error!("submission failed: {e}");
                SubmitOutcome::TransportFailed { message: TRANSPORT_ERROR_MESSAGE.to_string() }
            }
        };
        Ok(outcome)
    }

    /// Envío completo desde el paso 5.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CoreWizardError> {
        let payload = self.begin_submission()?;
        let result = self.api.submit(&payload);
        self.finish_submission(result)
    }
}
