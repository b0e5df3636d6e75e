//! Arma una sesión headless del wizard a partir de `AppConfig`.
//!
//! El store es Postgres si hay `DATABASE_URL`; si no, un directorio de
//! archivos JSON. La vista es `HeadlessView`, que registra lo que una UI
//! mostraría.

use log::info;

use challenge_adapters::{Endpoints, FileDraftStore, HttpChallengeApi};
use challenge_core::{ChallengeApi, ChallengeWizard, DraftStore, HeadlessView, WizardBuilder, WizardView};

use crate::config::AppConfig;
use crate::errors::AppError;

pub type AppWizard = ChallengeWizard<Box<dyn DraftStore>, HttpChallengeApi, HeadlessView>;

/// Abre el store configurado.
pub fn open_store(cfg: &AppConfig) -> Result<Box<dyn DraftStore>, AppError> {
    if let Some(url) = &cfg.database_url {
        let pool = challenge_persistence::build_pool(url, cfg.database_min_connections, cfg.database_max_connections)?;
        info!("drafts en Postgres");
        return Ok(Box::new(challenge_persistence::PgDraftStore::from_pool(pool)));
    }
    let store = FileDraftStore::open(&cfg.draft_dir)?;
    info!("drafts en {}", cfg.draft_dir.display());
    Ok(Box::new(store))
}

/// Monta el wizard contra la plataforma real.
pub fn open_wizard(cfg: &AppConfig) -> Result<AppWizard, AppError> {
    let store = open_store(cfg)?;
    let endpoints = Endpoints::new(&cfg.base_url, &cfg.product_slug)?;
    let api = HttpChallengeApi::new(endpoints, cfg.csrf_token.clone())?;
    let wizard = WizardBuilder::new(cfg.wizard_config(), store, api, HeadlessView::complete()).mount()?;
    Ok(wizard)
}

/// Resumen de una línea por dato del estado actual del wizard.
pub fn status_report<S, A, V>(wizard: &ChallengeWizard<S, A, V>) -> String
    where S: DraftStore,
          A: ChallengeApi,
          V: WizardView
{
    let draft = wizard.draft();
    let mut lines = vec![format!("step: {} ({:?})", wizard.current_step().number(), wizard.current_step()),
                         format!("fields: {}", draft.form_fields.len()),
                         format!("bounties: {}", wizard.bounties().len()),
                         format!("total_points: {}", wizard.total_points())];
    if let Some(saved) = draft.last_saved_at {
        lines.push(format!("last_saved_at: {}", saved.to_rfc3339()));
    }
    for b in wizard.bounties() {
        lines.push(format!("  - {} [{}] {} pts", b.title(), b.skill().name, b.points()));
    }
    lines.join("\n")
}
