//! Errores de la aplicación (binario y helpers de sesión).

use challenge_core::{ApiError, CoreWizardError, StoreError};
use challenge_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuración inválida: {0}")]
    Config(String),
    #[error("Wizard: {0}")]
    Wizard(#[from] CoreWizardError),
    #[error("API: {0}")]
    Api(#[from] ApiError),
    #[error("Almacenamiento: {0}")]
    Store(#[from] StoreError),
    #[error("Persistencia: {0}")]
    Persistence(#[from] PersistenceError),
}
