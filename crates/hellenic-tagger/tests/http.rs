use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use hellenic_types::GrammarModel;
use tower::util::ServiceExt;

use hellenic_tagger::{AppState, router};

const JOHN: &str = "JN 1:1.1 P Ἐν ἐν PREP 1722 ! ἐν ἐν\n\
                    JN 1:1.2 P ἀρχῇ ἀρχή N-DSF 746 ! ἀρχή ἀρχή\n\
                    JN 1:1.3 P ἦν. εἰμί V-IAI-3S 1510 ! εἰμί εἰμί\n\
                    JN 1:1.4 P ὁ ὁ T-NSM 3588 ! ὁ ὁ\n\
                    JN 1:1.5 P λόγος. λόγος N-NSM 3056 ! λόγος λόγος\n\
                    JN 1:1.6 P καὶ καί CONJ 2532 ! καί καί\n";

fn make_state() -> AppState {
    state_with(GrammarModel::greek())
}

fn state_with(grammar: GrammarModel) -> AppState {
    AppState {
        grammar: Arc::new(grammar),
        max_sentences: 100,
        disable_cache: false,
    }
}

async fn get(state: AppState, uri: &str) -> Response {
    router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(state: AppState, uri: &str, body: &str) -> Response {
    router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let response = get(make_state(), "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn decode_endpoint_returns_tag() {
    let response = get(
        make_state(),
        "/v1/decode?source=tischendorf&code=N-NSM&lemma=%CE%BB%CF%8C%CE%B3%CE%BF%CF%82",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=3600"
    );
    let body = json_body(response).await;
    assert_eq!(body["source"], "tischendorf");
    assert_eq!(body["code"], "N-NSM");
    assert_eq!(body["lemma"], "λόγος");
    assert_eq!(body["tag"]["class"], "noun");
    assert!(body["display"].as_str().unwrap().starts_with("noun"));
}

#[tokio::test]
async fn closed_class_carries_its_lemma() {
    let response = get(
        make_state(),
        "/v1/decode?source=tischendorf&code=CONJ&lemma=%CE%BA%CE%B1%CE%AF",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["tag"]["class"], "conj");
    assert_eq!(body["tag"]["text"], "καί");
}

#[tokio::test]
async fn tokens_outside_the_grammar_have_no_tag() {
    let response = get(make_state(), "/v1/decode?source=tischendorf&code=ARAM").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["tag"].is_null());
    assert!(body["display"].is_null());
}

#[tokio::test]
async fn malformed_code_is_unprocessable() {
    let response = get(make_state(), "/v1/decode?source=tischendorf&code=N-GS").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn empty_code_is_rejected() {
    let response = get(make_state(), "/v1/decode?source=tischendorf&code=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "code is required");
}

#[tokio::test]
async fn unknown_source_is_rejected() {
    let response = get(make_state(), "/v1/decode?source=vulgate&code=N-NSM").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registry_mismatch_is_a_server_error() {
    let grammar =
        GrammarModel::from_json_str(r#"{"tag_types": ["prep"], "inflection_types": {}}"#)
            .unwrap();
    let response = get(state_with(grammar), "/v1/decode?source=tischendorf&code=N-NSM").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "registry");
}

#[tokio::test]
async fn sentences_endpoint_segments_text() {
    let response = post(make_state(), "/v1/sentences?source=tischendorf", JOHN).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["source"], "tischendorf");
    assert_eq!(body["count"], 3);
    assert_eq!(body["truncated"], false);

    let sentences = body["sentences"].as_array().unwrap();
    let first: Vec<&str> = sentences[0]
        .as_array()
        .unwrap()
        .iter()
        .map(|word| word["form"].as_str().unwrap())
        .collect();
    assert_eq!(first, ["Ἐν", "ἀρχῇ", "ἦν", "."]);
    // The trailing valid sentence is kept at end of input.
    assert_eq!(sentences[2][0]["lemma"], "καί");
}

#[tokio::test]
async fn sentences_are_capped() {
    let mut state = make_state();
    state.max_sentences = 2;
    let response = post(state, "/v1/sentences?source=tischendorf", JOHN).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["truncated"], true);
}

#[tokio::test]
async fn perseus_body_must_be_json_lines() {
    let response = post(make_state(), "/v1/sentences?source=perseus", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("line 1"));
}

#[tokio::test]
async fn registry_mismatch_fails_sentences() {
    let grammar =
        GrammarModel::from_json_str(r#"{"tag_types": ["prep"], "inflection_types": {}}"#)
            .unwrap();
    let response = post(state_with(grammar), "/v1/sentences?source=tischendorf", JOHN).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn cache_header_can_be_disabled() {
    let mut state = make_state();
    state.disable_cache = true;
    let response = get(state, "/v1/decode?source=lxx&code=N2-NSM").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn grammar_can_be_loaded_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grammar.json");
    std::fs::write(
        &path,
        r#"{"tag_types": ["conj", "[PUNCTUATION]"], "inflection_types": {}}"#,
    )
    .unwrap();
    let grammar = GrammarModel::load(&path).unwrap();
    let response = get(
        state_with(grammar),
        "/v1/decode?source=tischendorf&code=CONJ&lemma=%CE%BA%CE%B1%CE%AF",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
