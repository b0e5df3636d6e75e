use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::{WizardEvent, WizardEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, session_id: Uuid, kind: WizardEventKind) -> WizardEvent;
    /// Lista eventos de una sesión (orden ascendente por seq).
    fn list(&self, session_id: Uuid) -> Vec<WizardEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: HashMap<Uuid, Vec<WizardEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: WizardEventKind) -> WizardEvent {
        let events = self.inner.entry(session_id).or_default();
        let ev = WizardEvent { seq: events.len() as u64,
                               session_id,
                               kind,
                               ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<WizardEvent> {
        self.inner.get(&session_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_per_session() {
        let mut store = InMemoryEventStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.append_kind(a, WizardEventKind::DraftReset);
        store.append_kind(b, WizardEventKind::DraftReset);
        let ev = store.append_kind(a, WizardEventKind::StepRetreated { from: 2, to: 1 });
        assert_eq!(ev.seq, 1);
        assert_eq!(store.list(a).len(), 2);
        assert_eq!(store.list(b)[0].seq, 0);
        assert!(store.list(Uuid::new_v4()).is_empty());
    }
}
