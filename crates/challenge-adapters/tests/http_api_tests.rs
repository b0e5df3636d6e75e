use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::runtime::Runtime;

use challenge_adapters::{Endpoints, HttpChallengeApi};
use challenge_core::{ApiError, Attachment, ChallengeApi, FormFields, SubmitPayload, SubmitResponse};
use challenge_domain::{BountyDraft, ExpertiseRef, FieldValue, SkillRef};

/// Petición tal como llegó al servidor mock.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<VecDeque<(u16, &'static str)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

async fn canned(State(state): State<MockState>,
                method: Method,
                uri: Uri,
                headers: HeaderMap,
                body: Bytes)
                -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    state.requests.lock().unwrap().push(Recorded { method,
                                                   uri: uri.to_string(),
                                                   headers,
                                                   body: String::from_utf8_lossy(&body).to_string() });
    let (code, body) = state.responses
                            .lock()
                            .unwrap()
                            .pop_front()
                            .unwrap_or((500, r#"{"detail":"no canned response"}"#));
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// Servidor axum con respuestas encoladas, una por petición en orden.
struct MockPlatform {
    base: String,
    state: MockState,
    _runtime: Runtime,
}

impl MockPlatform {
    fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let state = MockState::default();
        state.responses.lock().unwrap().extend(responses);
        let runtime = Runtime::new().unwrap();
        let listener = runtime.block_on(tokio::net::TcpListener::bind("127.0.0.1:0")).unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let app = Router::new().fallback(canned).with_state(state.clone());
        runtime.spawn(async move {
                   let _ = axum::serve(listener, app).await;
               });
        Self { base,
               state,
               _runtime: runtime }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }
}

fn api(base: &str) -> HttpChallengeApi {
    HttpChallengeApi::new(Endpoints::new(base, "acme").unwrap(), "csrf-123").unwrap()
}

#[test]
fn list_skills_reads_skills_key() {
    let server = MockPlatform::start(vec![(200, r#"{"skills":[{"id":1,"name":"Backend"},{"id":2,"name":"Design"}]}"#)]);
    let skills = api(&server.base).list_skills().unwrap();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[1].name, "Design");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].uri, "/expertise-options/");
    assert_eq!(requests[0].header("x-requested-with"), Some("XMLHttpRequest"));
}

#[test]
fn list_expertise_queries_each_skill_and_dedups() {
    let server = MockPlatform::start(vec![(200, r#"{"expertise":[{"id":10,"name":"Rust","parent_id":null},{"id":11,"name":"Go"}]}"#),
                                          (200, r#"{"expertise":[{"id":11,"name":"Go"},{"id":12,"name":"Figma"}]}"#)]);
    let items = api(&server.base).list_expertise(&[1, 2]).unwrap();
    let ids: Vec<_> = items.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);

    let uris: Vec<_> = server.requests().into_iter().map(|r| r.uri).collect();
    assert_eq!(uris, vec!["/expertise-options/?skill_id=1", "/expertise-options/?skill_id=2"]);
}

#[test]
fn failed_lookup_is_a_status_error() {
    let server = MockPlatform::start(vec![(500, r#"{"detail":"down"}"#)]);
    match api(&server.base).list_skills() {
        Err(ApiError::Status { code, .. }) => assert_eq!(code, 500),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(server.requests().len(), 1);
}

#[test]
fn submit_posts_multipart_with_csrf_and_reads_error_body() {
    let server = MockPlatform::start(vec![(400, r#"{"status":"error","errors":{"title":["Too short"]}}"#)]);
    let mut fields = FormFields::new();
    fields.set("title", FieldValue::text("Short"));
    let bounty = BountyDraft::new("API",
                                  "desc",
                                  Some(SkillRef { id: 3, name: "Backend".into() }),
                                  vec![ExpertiseRef { id: 30, name: "Rust".into() }],
                                  15).unwrap();
    let attachment = Attachment { field_name: "attachment".into(),
                                  file_name: "brief.txt".into(),
                                  content_type: "text/plain".into(),
                                  bytes: b"hello".to_vec() };
    let payload = SubmitPayload::build(&fields, &[bounty], &[attachment], "csrf-123");

    let response = api(&server.base).submit(&payload).unwrap();
    let SubmitResponse::Error { errors } = response else { panic!("expected error response") };
    assert_eq!(errors["title"], vec!["Too short".to_string()]);

    let requests = server.requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "/acme/challenge/create/");
    assert_eq!(req.header("x-csrftoken"), Some("csrf-123"));
    assert!(req.header("content-type").unwrap().starts_with("multipart/form-data; boundary="));
    assert!(req.body.contains("name=\"bounty-0-expertise_ids\"\r\n\r\n30"));
    assert!(req.body.contains("name=\"bounty-TOTAL_FORMS\"\r\n\r\n1"));
    assert!(req.body.contains("filename=\"brief.txt\""));
}

#[test]
fn submit_with_html_error_page_is_a_decode_error() {
    let server = MockPlatform::start(vec![(502, "<html>bad gateway</html>")]);
    let payload = SubmitPayload::build(&FormFields::new(), &[], &[], "csrf-123");
    assert!(matches!(api(&server.base).submit(&payload), Err(ApiError::Decode(_))));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    assert!(matches!(api(&base).list_skills(), Err(ApiError::Transport(_))));
}
