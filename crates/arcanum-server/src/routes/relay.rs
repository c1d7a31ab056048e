use crate::error::ApiError;
use crate::state::AppState;
use arcanum::{
    errors::{RelayError, RelayResult},
    models::{attachment::Attachment, message::ChatMessage},
    providers::{
        base::{ByteStream, UpstreamReply, UpstreamRequest},
        utils::merge_attachments,
    },
    stream::{ndjson, reframe},
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

// Types matching the incoming JSON structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayRequest {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    messages: Vec<ChatMessage>,
    #[serde(default)]
    attachments: Option<Vec<Attachment>>,
    #[serde(default)]
    stream: Option<bool>,
}

impl RelayRequest {
    /// Validate the request and fold its attachments into the conversation
    fn into_upstream(self, default_model: &str) -> RelayResult<UpstreamRequest> {
        let api_key = match self.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(RelayError::MissingApiKey),
        };
        if self.messages.is_empty() {
            return Err(RelayError::Validation(
                "messages must be a non-empty array".to_string(),
            ));
        }

        let model = self
            .model
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| default_model.to_string());
        let attachments = self.attachments.unwrap_or_default();

        Ok(UpstreamRequest {
            api_key,
            model,
            messages: merge_attachments(self.messages, &attachments),
            stream: self.stream.unwrap_or(false),
        })
    }
}

/// Streamed NDJSON body fed by a relay task
pub struct NdjsonResponse {
    rx: ReceiverStream<RelayResult<Bytes>>,
}

impl NdjsonResponse {
    fn new(rx: ReceiverStream<RelayResult<Bytes>>) -> Self {
        Self { rx }
    }
}

impl IntoResponse for NdjsonResponse {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            Body::from_stream(self.rx),
        )
            .into_response()
    }
}

/// Pump the reframed upstream into a channel read by the response body.
///
/// When the client goes away the receiver is dropped; the task notices without
/// waiting for another upstream chunk and drops the upstream, closing its
/// connection. An error item ends the body, which aborts the response mid-stream.
fn spawn_relay(upstream: ByteStream, max_line_bytes: usize) -> NdjsonResponse {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut body = ndjson(reframe(upstream, max_line_bytes));

        loop {
            let item = tokio::select! {
                _ = tx.closed() => {
                    tracing::debug!("client disconnected, closing upstream stream");
                    break;
                }
                item = body.next() => item,
            };
            let Some(item) = item else {
                break;
            };

            let failed = item.is_err();
            if let Err(e) = &item {
                tracing::error!(error = %e, "relay stream ended abnormally");
            }
            if tx.send(item).await.is_err() {
                tracing::debug!("client disconnected, closing upstream stream");
                break;
            }
            if failed {
                break;
            }
        }
    });

    NdjsonResponse::new(ReceiverStream::new(rx))
}

async fn handler(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| RelayError::Validation(rejection.body_text()))?;
    let request = request.into_upstream(&state.default_model)?;

    match state.upstream.send(request).await? {
        UpstreamReply::Complete(body) => {
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        UpstreamReply::Streaming(upstream) => {
            Ok(spawn_relay(upstream, state.max_line_bytes).into_response())
        }
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/relay/groq", post(handler))
        .with_state(state)
}
