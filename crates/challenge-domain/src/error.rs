// error.rs
use thiserror::Error;

/// Errores del dominio de challenges/bounties.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Campo requerido ausente o vacío. El mensaje es el texto mostrado al
    /// usuario junto al campo.
    #[error("{message}")]
    MissingField { field: &'static str, message: String },

    #[error("{0}")]
    ValidationError(String),

    #[error("Valor desconocido para {field}: {value}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Error de serialización: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Nombre del campo afectado (si aplica), útil para ubicar el mensaje en
    /// la vista.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::MissingField { field, .. } | DomainError::UnknownChoice { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}
