//! Errores del core del wizard.

use challenge_domain::{BountyId, DomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::api::ApiError;
use crate::store::StoreError;

/// Mensaje de validación asociado a un campo del formulario.
///
/// `field` es el nombre del input (o un nombre lógico como `bounties`); la
/// vista lo usa para ubicar el mensaje junto al campo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(),
               message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<DomainError> for FieldError {
    fn from(e: DomainError) -> Self {
        let field = e.field().unwrap_or("bounty");
        FieldError::new(field, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum CoreWizardError {
    #[error("step {step} has {} validation error(s)", errors.len())]
    StepValidation { step: u8, errors: Vec<FieldError> },
    #[error("bounty rejected: {}", errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join("; "))]
    BountyRejected { errors: Vec<FieldError> },
    #[error("no bounty at index {index} (len {len})")]
    InvalidBountyIndex { index: usize, len: usize },
    #[error("unknown bounty id {0}")]
    UnknownBounty(BountyId),
    #[error("submission is only allowed from the review step")]
    NotOnReviewStep,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission in flight")]
    NoSubmissionInFlight,
    #[error("wizard already submitted")]
    AlreadySubmitted,
    #[error("missing required view elements: {}", .0.join(", "))]
    MissingElements(Vec<String>),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid step number {0}")]
    InvalidStep(u8),
    #[error("draft store: {0}")]
    Store(#[from] StoreError),
    #[error("api: {0}")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CoreWizardError {
    fn from(e: serde_json::Error) -> Self {
        CoreWizardError::Serialization(e.to_string())
    }
}

impl CoreWizardError {
    /// Errores de campo asociados (validación de paso o de bounty).
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CoreWizardError::StepValidation { errors, .. } | CoreWizardError::BountyRejected { errors } => errors,
            _ => &[],
        }
    }
}
