use challenge_domain::BountyDraft;
use serde::{Deserialize, Serialize};

use crate::constants::{BOUNTY_FORMSET_PREFIX, BOUNTY_INITIAL_FORMS, BOUNTY_MAX_NUM_FORMS, BOUNTY_MIN_NUM_FORMS};
use crate::model::FormFields;

/// Nombre del campo de formulario que lleva el token CSRF.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Archivo adjunto del formulario principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Cuerpo multipart del envío, ya aplanado a pares `(nombre, valor)`.
///
/// Orden: campos del formulario, token CSRF, campos de gestión del formset
/// y luego los campos indexados de cada bounty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPayload {
    pub fields: Vec<(String, String)>,
    pub attachments: Vec<Attachment>,
    pub csrf_token: String,
}

fn formset_name(index: Option<usize>, field: &str) -> String {
    match index {
        Some(i) => format!("{BOUNTY_FORMSET_PREFIX}-{i}-{field}"),
        None => format!("{BOUNTY_FORMSET_PREFIX}-{field}"),
    }
}

impl SubmitPayload {
    /// Arma el payload a partir del estado en memoria. Los campos del
    /// formulario que colisionan con el formset o con el token se ignoran:
    /// los bounties salen sólo de la lista.
    pub fn build(fields: &FormFields, bounties: &[BountyDraft], attachments: &[Attachment], csrf_token: &str) -> Self {
        let formset_prefix = format!("{BOUNTY_FORMSET_PREFIX}-");
        let mut out: Vec<(String, String)> = Vec::new();

        for (name, value) in fields.iter() {
            if name == CSRF_FIELD || name.starts_with(&formset_prefix) {
                continue;
            }
            for v in value.form_values() {
                out.push((name.clone(), v));
            }
        }
        out.push((CSRF_FIELD.to_string(), csrf_token.to_string()));

        out.push((formset_name(None, "TOTAL_FORMS"), bounties.len().to_string()));
        out.push((formset_name(None, "INITIAL_FORMS"), BOUNTY_INITIAL_FORMS.to_string()));
        out.push((formset_name(None, "MIN_NUM_FORMS"), BOUNTY_MIN_NUM_FORMS.to_string()));
        out.push((formset_name(None, "MAX_NUM_FORMS"), BOUNTY_MAX_NUM_FORMS.to_string()));

        for (i, b) in bounties.iter().enumerate() {
            out.push((formset_name(Some(i), "title"), b.title().to_string()));
            out.push((formset_name(Some(i), "description"), b.description().to_string()));
            out.push((formset_name(Some(i), "points"), b.points().to_string()));
            out.push((formset_name(Some(i), "skill"), b.skill().id.to_string()));
            out.push((formset_name(Some(i), "expertise_ids"), b.expertise_ids_csv()));
        }

        Self { fields: out,
               attachments: attachments.to_vec(),
               csrf_token: csrf_token.to_string() }
    }

    /// Primer valor del campo `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields.iter().filter(|(n, _)| n == name).map(|(_, v)| v.as_str()).collect()
    }

    /// Cantidad de bounties declarada en el formset.
    pub fn bounty_count(&self) -> usize {
        self.value(&formset_name(None, "TOTAL_FORMS")).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}
