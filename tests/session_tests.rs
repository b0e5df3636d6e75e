use std::collections::HashMap;

use challenge_core::{DraftStore, SubmitOutcome, WizardStep};
use challenge_domain::{BountyDraft, ExpertiseRef, FieldValue, SkillRef};
use challengeflow::{open_store, open_wizard, status_report, AppConfig};

fn config_for(dir: &std::path::Path) -> AppConfig {
    let env: HashMap<&str, String> = [("CHALLENGEFLOW_BASE_URL", "http://127.0.0.1:9".to_string()),
                                      ("CHALLENGEFLOW_PRODUCT_SLUG", "acme".to_string()),
                                      ("CHALLENGEFLOW_CSRF_TOKEN", "tok".to_string()),
                                      ("CHALLENGEFLOW_DRAFT_DIR", dir.display().to_string())].into_iter()
                                                                                             .collect();
    AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap()
}

fn fill_to_review(cfg: &AppConfig) {
    let mut w = open_wizard(cfg).unwrap();
    w.set_field("reward_type", FieldValue::choice("points")).unwrap();
    w.advance().unwrap();
    w.set_field("title", FieldValue::text("Build the login flow")).unwrap();
    w.set_field("description",
                FieldValue::text("This challenge covers the full login flow, including tests and docs."))
     .unwrap();
    w.advance().unwrap();
    let b = BountyDraft::new("Endpoints",
                             "REST endpoints",
                             Some(SkillRef { id: 1, name: "Backend".into() }),
                             vec![ExpertiseRef { id: 10, name: "Rust".into() }],
                             40).unwrap();
    w.add_bounty(b).unwrap();
    w.advance().unwrap();
    w.set_field("status", FieldValue::choice("DRAFT")).unwrap();
    w.set_field("priority", FieldValue::choice("HIGH")).unwrap();
    w.advance().unwrap();
}

#[test]
fn session_resumes_from_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_for(dir.path());
    fill_to_review(&cfg);

    let store = open_store(&cfg).unwrap();
    assert_eq!(store.keys().unwrap(), vec!["challengeProgress".to_string()]);

    let w = open_wizard(&cfg).unwrap();
    assert_eq!(w.current_step(), WizardStep::Review);
    let report = status_report(&w);
    assert!(report.contains("step: 5 (Review)"));
    assert!(report.contains("total_points: 40"));
    assert!(report.contains("- Endpoints [Backend] 40 pts"));
}

#[test]
fn unreachable_platform_keeps_the_draft() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_for(dir.path());
    fill_to_review(&cfg);

    let mut w = open_wizard(&cfg).unwrap();
    match w.submit().unwrap() {
        SubmitOutcome::TransportFailed { .. } => {}
        other => panic!("esperaba TransportFailed, obtuve {other:?}"),
    }
    drop(w);
    let again = open_wizard(&cfg).unwrap();
    assert_eq!(again.bounties().len(), 1);
}
