//! `ChallengeApi` sobre HTTP.
//!
//! Todas las peticiones llevan `X-Requested-With: XMLHttpRequest`; las que
//! mutan (envío y tabla renderizada) llevan además `X-CSRFToken`.
use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use challenge_core::{ApiError, ChallengeApi, SubmitPayload, SubmitResponse};
use challenge_domain::{BountyDraft, Expertise, Skill};

use crate::endpoints::Endpoints;

const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");
const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Deserialize)]
struct SkillsBody {
    skills: Vec<Skill>,
}

#[derive(Deserialize)]
struct ExpertiseBody {
    expertise: Vec<Expertise>,
}

#[derive(Debug, Clone)]
pub struct HttpChallengeApi {
    client: Client,
    endpoints: Endpoints,
    csrf_token: String,
}

impl HttpChallengeApi {
    pub fn new(endpoints: Endpoints, csrf_token: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(30))
                                      .build()
                                      .map_err(|e| ApiError::Transport(format!("cannot build http client: {e}")))?;
        Ok(Self { client,
                  endpoints,
                  csrf_token: csrf_token.into() })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn transport(e: reqwest::Error) -> ApiError {
        ApiError::Transport(e.to_string())
    }

    fn ensure_success(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(ApiError::Status { code: status.as_u16(),
                               body: body.chars().take(200).collect() })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {url}");
        let resp = self.client
                       .get(url)
                       .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
                       .send()
                       .map_err(Self::transport)?;
        let text = Self::ensure_success(resp)?.text().map_err(Self::transport)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl ChallengeApi for HttpChallengeApi {
    fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
        let body: SkillsBody = self.get_json(self.endpoints.skills()?)?;
        Ok(body.skills)
    }

    /// Una petición por skill; el resultado se deduplica por id.
    fn list_expertise(&self, skill_ids: &[i64]) -> Result<Vec<Expertise>, ApiError> {
        let mut by_id: BTreeMap<i64, Expertise> = BTreeMap::new();
        let mut order = Vec::new();
        for id in skill_ids {
            let body: ExpertiseBody = self.get_json(self.endpoints.expertise(*id)?)?;
            for e in body.expertise {
                if !by_id.contains_key(&e.id) {
                    order.push(e.id);
                    by_id.insert(e.id, e);
                }
            }
        }
        Ok(order.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }

    fn render_bounty_table(&self, bounties: &[BountyDraft]) -> Result<String, ApiError> {
        let url = self.endpoints.bounty_table()?;
        debug!("POST {url} bounties={}", bounties.len());
        let resp = self.client
                       .post(url)
                       .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
                       .header(CSRF_HEADER, &self.csrf_token)
                       .json(&json!({ "bounties": bounties }))
                       .send()
                       .map_err(Self::transport)?;
        Self::ensure_success(resp)?.text().map_err(Self::transport)
    }

    /// El endpoint responde JSON tanto en éxito como en error de
    /// validación; el status HTTP no decide el resultado.
    fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, ApiError> {
        let mut form = multipart::Form::new();
        for (name, value) in &payload.fields {
            form = form.text(name.clone(), value.clone());
        }
        for a in &payload.attachments {
            let part = multipart::Part::bytes(a.bytes.clone()).file_name(a.file_name.clone())
                                                              .mime_str(&a.content_type)
                                                              .map_err(|e| {
                                                                  ApiError::Transport(format!("invalid content type for {}: {e}",
                                                                                              a.file_name))
                                                              })?;
            form = form.part(a.field_name.clone(), part);
        }

        let url = self.endpoints.create()?;
        debug!("POST {url} fields={} files={}", payload.fields.len(), payload.attachments.len());
        let resp = self.client
                       .post(url)
                       .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
                       .header(CSRF_HEADER, &payload.csrf_token)
                       .multipart(form)
                       .send()
                       .map_err(Self::transport)?;
        let status = resp.status();
        let text = resp.text().map_err(Self::transport)?;
        serde_json::from_str(&text).map_err(|e| {
                                       warn!("non-JSON response from create endpoint (status {status})");
                                       ApiError::Decode(format!("status {status}: {e}"))
                                   })
    }
}
