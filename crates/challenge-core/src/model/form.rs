use challenge_domain::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Valores del formulario principal, por nombre de campo.
///
/// `BTreeMap` mantiene un orden estable: el fingerprint del draft y el
/// payload multipart no dependen del orden de edición.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, FieldValue>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Texto del campo; cadena vacía si no existe.
    pub fn text(&self, name: &str) -> String {
        self.0.get(name).map(|v| v.as_text()).unwrap_or_default()
    }

    /// Texto del campo si existe y no está en blanco.
    pub fn non_blank(&self, name: &str) -> Option<String> {
        self.0.get(name).filter(|v| !v.is_blank()).map(|v| v.as_text())
    }

    pub fn is_blank(&self, name: &str) -> bool {
        self.0.get(name).map(|v| v.is_blank()).unwrap_or(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
