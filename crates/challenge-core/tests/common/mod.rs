#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use challenge_core::{ApiError, ChallengeApi, ChallengeWizard, HeadlessView, InMemoryDraftStore, SubmitPayload,
                     SubmitResponse, WizardBuilder, WizardConfig};
use challenge_domain::{BountyDraft, Expertise, ExpertiseRef, FieldValue, Skill, SkillRef};

/// API en memoria: respuestas encoladas y registro de envíos.
#[derive(Debug, Default)]
pub struct CannedApi {
    pub skills: Vec<Skill>,
    pub expertise: Vec<Expertise>,
    pub table_html: Option<String>,
    pub responses: RefCell<VecDeque<Result<SubmitResponse, ApiError>>>,
    pub submitted: RefCell<Vec<SubmitPayload>>,
    /// Los lookups fallan con error de transporte mientras estén en `true`.
    pub fail_skills: Cell<bool>,
    pub fail_expertise: Cell<bool>,
}

impl CannedApi {
    pub fn new() -> Self {
        Self { skills: vec![Skill { id: 1, name: "Backend".into() }, Skill { id: 2, name: "Design".into() }],
               expertise: vec![Expertise { id: 10, name: "Rust".into(), parent_id: None },
                               Expertise { id: 11, name: "Async".into(), parent_id: Some(10) }],
               ..Self::default() }
    }

    pub fn respond(&self, response: Result<SubmitResponse, ApiError>) {
        self.responses.borrow_mut().push_back(response);
    }
}

impl ChallengeApi for CannedApi {
    fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
        if self.fail_skills.get() {
            return Err(ApiError::Transport("connection reset".into()));
        }
        Ok(self.skills.clone())
    }

    fn list_expertise(&self, _skill_ids: &[i64]) -> Result<Vec<Expertise>, ApiError> {
        if self.fail_expertise.get() {
            return Err(ApiError::Transport("connection reset".into()));
        }
        Ok(self.expertise.clone())
    }

    fn render_bounty_table(&self, bounties: &[BountyDraft]) -> Result<String, ApiError> {
        match &self.table_html {
            Some(prefix) => Ok(format!("{prefix}:{}", bounties.len())),
            None => Err(ApiError::Status { code: 500, body: "boom".into() }),
        }
    }

    fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, ApiError> {
        self.submitted.borrow_mut().push(payload.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(SubmitResponse::Success { redirect_url: "/acme/challenges/1".into() }))
    }
}

pub type TestWizard = ChallengeWizard<InMemoryDraftStore, CannedApi, HeadlessView>;

pub fn config() -> WizardConfig {
    WizardConfig::new("acme", "csrf-token")
}

pub fn mount_with(store: InMemoryDraftStore, api: CannedApi, config: WizardConfig) -> TestWizard {
    WizardBuilder::new(config, store, api, HeadlessView::complete()).mount().unwrap()
}

pub fn mount() -> TestWizard {
    mount_with(InMemoryDraftStore::new(), CannedApi::new(), config())
}

pub fn bounty(title: &str, points: u32) -> BountyDraft {
    BountyDraft::new(title,
                     format!("Work for {title}"),
                     Some(SkillRef { id: 1, name: "Backend".into() }),
                     vec![ExpertiseRef { id: 10, name: "Rust".into() }],
                     points).unwrap()
}

pub const LONG_DESCRIPTION: &str = "This challenge covers the full login flow, including tests and docs.";

/// Lleva el wizard hasta el paso 5 con un bounty.
pub fn fill_to_review(w: &mut TestWizard) {
    w.set_field("reward_type", FieldValue::choice("points")).unwrap();
    w.advance().unwrap();
    w.set_field("title", FieldValue::text("Build the login flow")).unwrap();
    w.set_field("description", FieldValue::text(LONG_DESCRIPTION)).unwrap();
    w.advance().unwrap();
    w.add_bounty(bounty("Backend endpoints", 50)).unwrap();
    w.advance().unwrap();
    w.set_field("status", FieldValue::choice("DRAFT")).unwrap();
    w.set_field("priority", FieldValue::choice("HIGH")).unwrap();
    w.advance().unwrap();
}
