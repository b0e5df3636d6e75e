use challenge_adapters::FileDraftStore;
use challenge_core::{DraftStore, HeadlessView, InMemoryEventStore, WizardBuilder, WizardConfig};
use challenge_domain::FieldValue;

mod support {
    use challenge_core::{ApiError, ChallengeApi, SubmitPayload, SubmitResponse};
    use challenge_domain::{BountyDraft, Expertise, Skill};

    /// API que nunca se alcanza en estos tests.
    pub struct OfflineApi;

    impl ChallengeApi for OfflineApi {
        fn list_skills(&self) -> Result<Vec<Skill>, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }

        fn list_expertise(&self, _: &[i64]) -> Result<Vec<Expertise>, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }

        fn render_bounty_table(&self, _: &[BountyDraft]) -> Result<String, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }

        fn submit(&self, _: &SubmitPayload) -> Result<SubmitResponse, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
    }
}

#[test]
fn put_get_remove_and_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileDraftStore::open(dir.path().join("drafts")).unwrap();
    assert_eq!(store.get("challengeProgress").unwrap(), None);

    store.put("challengeProgress", "{\"a\":1}").unwrap();
    store.put("other-product", "{}").unwrap();
    store.put("challengeProgress", "{\"a\":2}").unwrap();
    assert_eq!(store.get("challengeProgress").unwrap().as_deref(), Some("{\"a\":2}"));
    assert_eq!(store.keys().unwrap(), vec!["challengeProgress".to_string(), "other-product".to_string()]);

    store.remove("challengeProgress").unwrap();
    store.remove("challengeProgress").unwrap();
    assert_eq!(store.keys().unwrap(), vec!["other-product".to_string()]);
}

#[test]
fn wizard_progress_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = WizardConfig::new("acme", "token");
    {
        let store = FileDraftStore::open(dir.path()).unwrap();
        let mut w = WizardBuilder::new(config.clone(), store, support::OfflineApi, HeadlessView::complete()).mount()
                                                                                                        .unwrap();
        w.set_field("reward_type", FieldValue::choice("points")).unwrap();
        w.advance().unwrap();
        w.set_field("title", FieldValue::text("Half-finished challenge")).unwrap();
    }

    let store = FileDraftStore::open(dir.path()).unwrap();
    let w = WizardBuilder::new(config, store, support::OfflineApi, HeadlessView::complete())
        .with_event_store(InMemoryEventStore::default())
        .mount()
        .unwrap();
    assert_eq!(w.current_step().number(), 2);
    assert_eq!(w.draft().form_fields.text("title"), "Half-finished challenge");
    assert_eq!(w.view().fields.get("reward_type"), Some(&FieldValue::choice("points")));
}
