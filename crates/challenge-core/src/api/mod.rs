//! Frontera con el servidor de la plataforma.
//!
//! `ChallengeApi` reemplaza las llamadas `fetch` del navegador: listado de
//! skills y expertise, la tabla renderizada por el servidor y el envío
//! multipart del challenge.

mod payload;
mod response;

pub use payload::{Attachment, SubmitPayload, CSRF_FIELD};
pub use response::{map_server_errors, DisplayError, SubmitResponse};

use challenge_domain::{BountyDraft, Expertise, Skill};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// La petición no llegó o no hubo respuesta.
    #[error("transport: {0}")]
    Transport(String),
    #[error("unexpected status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub trait ChallengeApi {
    fn list_skills(&self) -> Result<Vec<Skill>, ApiError>;

    /// Expertise de las skills indicadas (tuplas planas con `parent_id`).
    fn list_expertise(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, ApiError>;

    /// Fragmento HTML de la tabla de bounties generado por el servidor.
    fn render_bounty_table(&self, bounties: &[BountyDraft]) -> Result<String, ApiError>;

    fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, ApiError>;
}

impl<T: ChallengeApi + ?Sized> ChallengeApi for Box<T> {
    fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
        (**self).list_skills()
    }

    fn list_expertise(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, ApiError> {
        (**self).list_expertise(skill_ids)
    }

    fn render_bounty_table(&self, bounties: &[BountyDraft]) -> Result<String, ApiError> {
        (**self).render_bounty_table(bounties)
    }

    fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, ApiError> {
        (**self).submit(payload)
    }
}
