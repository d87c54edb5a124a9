use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hellenic_corpora::sentences_from_text;
use hellenic_morph::{DecodeError, Source};
use hellenic_types::{GrammarModel, Sentence, Tag};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub grammar: Arc<GrammarModel>,
    pub max_sentences: usize,
    pub disable_cache: bool,
}

#[derive(Deserialize)]
pub struct DecodeQuery {
    pub source: String,
    pub code: String,
    pub lemma: Option<String>,
}

#[derive(Deserialize)]
pub struct SentencesQuery {
    pub source: String,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    source: Source,
    code: String,
    lemma: String,
    /// `null` when the source marks the token as outside the grammar.
    tag: Option<Arc<Tag>>,
    display: Option<String>,
}

#[derive(Serialize)]
pub struct SentencesResponse {
    source: Source,
    count: usize,
    truncated: bool,
    sentences: Vec<Sentence>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/decode", get(decode))
        .route("/v1/sentences", post(sentences))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

fn parse_source(raw: &str) -> Result<Source, ApiError> {
    raw.parse::<Source>()
        .map_err(|e| ApiError::bad_request(e.to_string()))
}

async fn decode(
    State(state): State<AppState>,
    Query(params): Query<DecodeQuery>,
) -> Result<Response, ApiError> {
    let source = parse_source(&params.source)?;
    let code = params.code.trim();
    if code.is_empty() {
        return Err(ApiError::bad_request("code is required"));
    }
    let lemma = params.lemma.unwrap_or_default();

    let tag = source.decoder(&state.grammar).decode(code, &lemma)?;
    let response = DecodeResponse {
        source,
        code: code.to_string(),
        lemma,
        display: tag.as_ref().map(|t| t.to_string()),
        tag,
    };

    if state.disable_cache {
        Ok(Json(response).into_response())
    } else {
        Ok((
            [(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            )],
            Json(response),
        )
            .into_response())
    }
}

async fn sentences(
    State(state): State<AppState>,
    Query(params): Query<SentencesQuery>,
    body: String,
) -> Result<Response, ApiError> {
    let source = parse_source(&params.source)?;
    let stream = sentences_from_text(source, &state.grammar, &body)
        .map_err(|e| ApiError::bad_request(format!("{e:#}")))?;

    let mut sentences = Vec::new();
    let mut truncated = false;
    for sentence in stream {
        if sentences.len() == state.max_sentences {
            truncated = true;
            break;
        }
        sentences.push(sentence?);
    }

    let response = SentencesResponse {
        source,
        count: sentences.len(),
        truncated,
        sentences,
    };
    Ok(Json(response).into_response())
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("{0}")]
    Registry(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        if err.is_fatal() {
            warn!(error = %err, "grammar registry mismatch");
            ApiError::Registry(err.to_string())
        } else {
            ApiError::Unprocessable(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Unprocessable(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            ApiError::Registry(msg) => {
                let body = Json(json!({ "error": msg, "kind": "registry" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
