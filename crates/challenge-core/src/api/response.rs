use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Respuesta JSON del endpoint de creación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitResponse {
    Success { redirect_url: String },
    Error {
        #[serde(default, deserialize_with = "messages_by_field")]
        errors: BTreeMap<String, Vec<String>>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Acepta tanto `{"title": "msg"}` como `{"title": ["a", "b"]}`.
fn messages_by_field<'de, D>(d: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
    where D: Deserializer<'de>
{
    let raw = BTreeMap::<String, OneOrMany>::deserialize(d)?;
    Ok(raw.into_iter()
          .map(|(k, v)| {
              let msgs = match v {
                  OneOrMany::One(s) => vec![s],
                  OneOrMany::Many(v) => v,
              };
              (k, msgs)
          })
          .collect())
}

/// Mensaje listo para mostrar. `slot` es el id del contenedor de error del
/// campo; `None` va al contenedor general.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayError {
    pub slot: Option<String>,
    pub message: String,
}

const NON_FIELD_ERRORS: &str = "non_field_errors";

/// `bounty_<index>_<field>` → `Bounty <index+1> <field>`.
fn bounty_label(key: &str) -> Option<String> {
    let mut parts = key.splitn(3, '_');
    if parts.next()? != "bounty" {
        return None;
    }
    let index: usize = parts.next()?.parse().ok()?;
    let field = parts.next().filter(|f| !f.is_empty())?;
    Some(format!("Bounty {} {}", index + 1, field.replace('_', " ")))
}

/// Traduce los errores del servidor: exactamente un mensaje por entrada.
///
/// - `non_field_errors`: mensajes tal cual, al contenedor general.
/// - `bounty_<i>_<field>`: `"Bounty <i+1> <field>: msgs"`, contenedor general.
/// - clave con slot en la vista: los mensajes van a ese slot.
/// - resto: `"<field>: msgs"`, contenedor general.
pub fn map_server_errors(errors: &BTreeMap<String, Vec<String>>, has_slot: impl Fn(&str) -> bool) -> Vec<DisplayError> {
    let mut out = Vec::with_capacity(errors.len());
    if let Some(msgs) = errors.get(NON_FIELD_ERRORS) {
        out.push(DisplayError { slot: None,
                                message: msgs.join(", ") });
    }
    for (key, msgs) in errors {
        if key == NON_FIELD_ERRORS {
            continue;
        }
        let joined = msgs.join(", ");
        let shown = if let Some(label) = bounty_label(key) {
            DisplayError { slot: None,
                           message: format!("{label}: {joined}") }
        } else if has_slot(key) {
            DisplayError { slot: Some(key.clone()),
                           message: joined }
        } else {
            DisplayError { slot: None,
                           message: format!("{key}: {joined}") }
        };
        out.push(shown);
    }
    out
}
