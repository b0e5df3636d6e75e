//! Persistencia del draft bajo una clave fija.
//!
//! El valor guardado es un envelope JSON:
//! `{schema_version, wizard_version, fingerprint, saved_at, draft}`.
//! `restore` nunca falla hacia afuera: cualquier problema (clave ilegible,
//! JSON inválido, versión distinta, fingerprint que no coincide) se registra
//! con `warn!` y se informa como `RestoreOutcome::Discarded`.
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DRAFT_SCHEMA_VERSION, WIZARD_VERSION};
use crate::errors::CoreWizardError;
use crate::model::Draft;
use crate::store::DraftStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEnvelope {
    pub schema_version: u32,
    pub wizard_version: String,
    pub fingerprint: String,
    pub saved_at: DateTime<Utc>,
    pub draft: Draft,
}

impl DraftEnvelope {
    pub fn seal(draft: &Draft, saved_at: DateTime<Utc>) -> Self {
        Self { schema_version: DRAFT_SCHEMA_VERSION,
               wizard_version: WIZARD_VERSION.to_string(),
               fingerprint: draft.fingerprint(),
               saved_at,
               draft: draft.clone() }
    }

    /// Parsea y verifica un envelope guardado.
    pub fn open(raw: &str) -> Result<Self, String> {
        let env: DraftEnvelope = serde_json::from_str(raw).map_err(|e| format!("unreadable draft: {e}"))?;
        if env.schema_version != DRAFT_SCHEMA_VERSION {
            return Err(format!("schema version {} (expected {})", env.schema_version, DRAFT_SCHEMA_VERSION));
        }
        let actual = env.draft.fingerprint();
        if actual != env.fingerprint {
            return Err(format!("fingerprint mismatch (stored {}, computed {})", env.fingerprint, actual));
        }
        Ok(env)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(Draft),
    /// No había nada guardado bajo la clave.
    Empty,
    /// Había algo pero no se pudo usar.
    Discarded { reason: String },
}

/// Guarda y restaura el draft de un wizard en un `DraftStore`.
#[derive(Debug)]
pub struct DraftPersistence<S: DraftStore> {
    store: S,
    key: String,
}

impl<S: DraftStore> DraftPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Marca `last_saved_at` y escribe el envelope. Devuelve el fingerprint.
    pub fn save(&mut self, draft: &mut Draft, now: DateTime<Utc>) -> Result<String, CoreWizardError> {
        draft.last_saved_at = Some(now);
        let env = DraftEnvelope::seal(draft, now);
        let raw = serde_json::to_string(&env)?;
        self.store.put(&self.key, &raw)?;
        debug!("draft saved key={} fp={}", self.key, env.fingerprint);
        Ok(env.fingerprint)
    }

    pub fn restore(&self) -> RestoreOutcome {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RestoreOutcome::Empty,
            Err(e) => {
                warn!("could not read draft key={}: {}", self.key, e);
                return RestoreOutcome::Discarded { reason: e.to_string() };
            }
        };
        match DraftEnvelope::open(&raw) {
            Ok(env) => {
                let mut draft = env.draft;
                draft.last_saved_at = Some(env.saved_at);
                RestoreOutcome::Restored(draft)
            }
            Err(reason) => {
                warn!("discarding stored draft key={}: {}", self.key, reason);
                RestoreOutcome::Discarded { reason }
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), CoreWizardError> {
        self.store.remove(&self.key)?;
        debug!("draft cleared key={}", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::WizardStep;
    use crate::store::InMemoryDraftStore;
    use challenge_domain::FieldValue;

    fn persistence() -> DraftPersistence<InMemoryDraftStore> {
        DraftPersistence::new(InMemoryDraftStore::new(), "challengeProgress")
    }

    #[test]
    fn save_then_restore_roundtrips() {
        let mut p = persistence();
        let mut d = Draft::new();
        d.current_step = WizardStep::StatusPriority;
        d.form_fields.set("status", FieldValue::choice("DRAFT"));
        p.save(&mut d, Utc::now()).unwrap();
        assert_eq!(p.restore(), RestoreOutcome::Restored(d));
    }

    #[test]
    fn empty_and_corrupt_values() {
        let mut p = persistence();
        assert_eq!(p.restore(), RestoreOutcome::Empty);
        p.store_mut().put("challengeProgress", "{not json").unwrap();
        assert!(matches!(p.restore(), RestoreOutcome::Discarded { .. }));
    }

    #[test]
    fn tampered_content_is_discarded() {
        let mut p = persistence();
        let mut d = Draft::new();
        d.form_fields.set("title", FieldValue::text("Original title"));
        p.save(&mut d, Utc::now()).unwrap();

        let raw = p.store().get("challengeProgress").unwrap().unwrap();
        let mut v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        v["draft"]["form_fields"]["title"]["value"] = serde_json::json!("Edited by hand");
        p.store_mut().put("challengeProgress", &v.to_string()).unwrap();
        match p.restore() {
            RestoreOutcome::Discarded { reason } => assert!(reason.contains("fingerprint")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_schema_version_is_discarded() {
        let mut p = persistence();
        let mut d = Draft::new();
        p.save(&mut d, Utc::now()).unwrap();
        let raw = p.store().get("challengeProgress").unwrap().unwrap();
        let mut v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        v["schema_version"] = serde_json::json!(99);
        p.store_mut().put("challengeProgress", &v.to_string()).unwrap();
        assert!(matches!(p.restore(), RestoreOutcome::Discarded { .. }));
        p.clear().unwrap();
        assert_eq!(p.restore(), RestoreOutcome::Empty);
    }
}
