use std::collections::BTreeMap;

use super::{DraftStore, StoreError};

#[derive(Debug, Default, Clone)]
pub struct InMemoryDraftStore {
    inner: BTreeMap<String, String>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for InMemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.inner.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_and_remove_is_idempotent() {
        let mut s = InMemoryDraftStore::new();
        s.put("k", "1").unwrap();
        s.put("k", "2").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("2"));
        s.remove("k").unwrap();
        s.remove("k").unwrap();
        assert_eq!(s.get("k").unwrap(), None);
        assert!(s.keys().unwrap().is_empty());
    }
}
