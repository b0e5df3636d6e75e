//! Draft: estado de trabajo de un challenge en autoría.
//!
//! El draft es la única fuente de verdad del lado cliente: la tabla de
//! bounties, el resumen del paso 5 y el payload de envío se derivan de él.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::bounty::BountyCollection;
use crate::hashing::hash_value;
use crate::model::FormFields;
use crate::step::WizardStep;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub current_step: WizardStep,
    pub form_fields: FormFields,
    pub bounties: BountyCollection,
    /// Metadato: no entra al fingerprint.
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contenido que identifica al draft (sin timestamps).
    pub fn content_value(&self) -> Value {
        json!({
            "current_step": self.current_step.number(),
            "form_fields": self.form_fields,
            "bounties": self.bounties,
        })
    }

    /// Fingerprint blake3 del contenido canonicalizado.
    pub fn fingerprint(&self) -> String {
        hash_value(&self.content_value())
    }

    /// Igualdad de contenido ignorando `last_saved_at`.
    pub fn same_content(&self, other: &Draft) -> bool {
        self.current_step == other.current_step && self.form_fields == other.form_fields && self.bounties == other.bounties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challenge_domain::FieldValue;

    #[test]
    fn fingerprint_ignores_save_timestamp() {
        let mut a = Draft::new();
        a.form_fields.set("title", FieldValue::text("Hello world"));
        let mut b = a.clone();
        b.last_saved_at = Some(Utc::now());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(a.same_content(&b));

        b.current_step = WizardStep::Details;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
