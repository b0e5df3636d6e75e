// field.rs
use serde::{Deserialize, Serialize};

/// Valor de un campo del formulario principal.
///
/// Se distinguen los inputs de selección porque al restaurar un draft no
/// basta con asignar el valor: hay que marcar la opción correspondiente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Input de texto, textarea o editor enriquecido.
    Text(String),
    /// Radio o select de opción única.
    Choice(String),
    /// Grupo de checkboxes.
    Flags(Vec<String>),
}

impl FieldValue {
    pub fn text(v: impl Into<String>) -> Self {
        FieldValue::Text(v.into())
    }

    pub fn choice(v: impl Into<String>) -> Self {
        FieldValue::Choice(v.into())
    }

    /// Representación textual (checkboxes unidos por coma).
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.clone(),
            FieldValue::Flags(v) => v.join(","),
        }
    }

    /// Vacío tras recortar espacios (o sin ninguna casilla marcada).
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.trim().is_empty(),
            FieldValue::Flags(v) => v.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Valores que deben enviarse en el payload multipart: uno por casilla
    /// marcada en el caso de checkboxes.
    pub fn form_values(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => vec![s.clone()],
            FieldValue::Flags(v) => v.clone(),
        }
    }

    pub fn is_selection(&self) -> bool {
        !matches!(self, FieldValue::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_trims() {
        assert!(FieldValue::text("   ").is_blank());
        assert!(FieldValue::Flags(vec![]).is_blank());
        assert!(!FieldValue::choice("HIGH").is_blank());
    }

    #[test]
    fn serde_shape_is_tagged() {
        let v = serde_json::to_value(FieldValue::choice("ACTIVE")).unwrap();
        assert_eq!(v, serde_json::json!({"kind": "choice", "value": "ACTIVE"}));
    }
}
