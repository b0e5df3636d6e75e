//! Eventos observables de una sesión del wizard.
//!
//! Cada transición visible para el usuario (navegación, bounties, draft,
//! envío) se agrega a un `EventStore` append-only. Sirven para auditar una
//! sesión y para verificar en tests el orden de los efectos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use challenge_domain::BountyId;

use crate::errors::FieldError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEventKind {
    /// Primer evento de una sesión: el wizard quedó montado.
    WizardMounted { step: u8 },
    /// Navegación hacia adelante aceptada.
    StepAdvanced { from: u8, to: u8 },
    /// Navegación hacia adelante bloqueada por validación.
    StepRejected { step: u8, errors: Vec<FieldError> },
    StepRetreated { from: u8, to: u8 },
    BountyAdded { bounty_id: BountyId, position: usize },
    BountyRejected { errors: Vec<FieldError> },
    BountyRemoved { bounty_id: BountyId, position: usize },
    DraftSaved { fingerprint: String },
    DraftRestored { fingerprint: String, step: u8 },
    /// El draft guardado no se pudo usar y se empezó uno vacío.
    DraftDiscarded { reason: String },
    DraftReset,
    SubmissionStarted { bounty_count: usize },
    SubmissionSucceeded { redirect_url: String },
    SubmissionRejected { messages: usize },
    SubmissionFailed { error: String },
    /// Respuesta de lookup descartada por llegar tarde.
    StaleLookupDropped { lookup: String, generation: u64 },
    /// Lookup que no llegó o no se pudo leer; se mostró el aviso genérico.
    LookupFailed { lookup: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardEvent {
    pub seq: u64, // orden de append dentro de la sesión
    pub session_id: Uuid,
    pub kind: WizardEventKind,
    pub ts: DateTime<Utc>, // metadato
}
