//! Almacén clave-valor para el draft.
//!
//! El wizard sólo conoce el trait; el backend concreto (memoria, archivos,
//! Postgres) se elige al construirlo.

mod memory;

pub use memory::InMemoryDraftStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("invalid key '{0}'")]
    InvalidKey(String),
}

/// Almacén clave → texto. Las escrituras reemplazan el valor previo.
pub trait DraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Quitar una clave inexistente no es error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    /// Claves presentes, ordenadas.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<T: DraftStore + ?Sized> DraftStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}
