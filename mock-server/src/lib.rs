use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct ImageGenerationRequest {
    pub data: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
    };
    Router::new()
        .route("/v1/chat/completions", post(chat_completion))
        .route("/v1/images/generations", post(image_generation))
        .route("/v1/models/{model}/transcriptions", post(transcription))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": { "message": message.into() } })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match presented {
        Some(token) if token == &*state.token => Ok(()),
        Some(_) => Err(error(StatusCode::UNAUTHORIZED, "invalid token")),
        None => Err(error(StatusCode::UNAUTHORIZED, "missing bearer token")),
    }
}

/// Runs before any body extractor, so unauthenticated requests never reach
/// JSON or multipart parsing.
async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    authorize(&state, request.headers())?;
    Ok(next.run(request).await)
}

async fn chat_completion(Json(input): Json<ChatCompletionRequest>) -> ApiResult {
    let prompt = input
        .messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.clone())
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "no user message"))?;
    tracing::debug!(model = %input.model, "chat completion");

    Ok(Json(json!({
        "id": format!("chatcmpl-{}", Uuid::new_v4().simple()),
        "object": "chat.completion",
        "model": input.model,
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": format!("echo: {prompt}") },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": prompt.split_whitespace().count(),
            "completion_tokens": prompt.split_whitespace().count() + 1
        }
    })))
}

async fn image_generation(Json(input): Json<ImageGenerationRequest>) -> ApiResult {
    if input.data.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "data must contain at least one prompt"));
    }
    let images: Vec<Value> = input
        .data
        .iter()
        .map(|prompt| {
            json!({
                "prompt": prompt,
                "url": format!("https://mock.local/images/{}.png", Uuid::new_v4().simple())
            })
        })
        .collect();
    Ok(Json(json!({ "data": images })))
}

async fn transcription(Path(path_model): Path<String>, mut multipart: Multipart) -> ApiResult {
    let mut model: Option<String> = None;
    let mut file: Option<(String, usize)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("model") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;
                model = Some(value);
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| error(StatusCode::BAD_REQUEST, e.body_text()))?;
                file = Some((name, bytes.len()));
            }
            _ => {}
        }
    }

    let model = model.ok_or_else(|| error(StatusCode::BAD_REQUEST, "missing model field"))?;
    let (file_name, size) =
        file.ok_or_else(|| error(StatusCode::BAD_REQUEST, "missing file field"))?;

    Ok(Json(json!({
        "text": format!("transcribed {size} bytes from {file_name}"),
        "model": model,
        "served_by": path_model
    })))
}
