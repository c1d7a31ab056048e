use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use std::fmt;

use crate::errors::RelayResult;
use crate::models::message::ChatMessage;

/// Raw response body of a streaming upstream call
pub type ByteStream = BoxStream<'static, RelayResult<Bytes>>;

/// Everything the upstream needs for a single chat completion call
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub api_key: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

pub enum UpstreamReply {
    /// Fully buffered completion body, byte for byte as the upstream sent it
    Complete(Bytes),
    /// Unread response body, handed over for reframing
    Streaming(ByteStream),
}

impl fmt::Debug for UpstreamReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamReply::Complete(body) => f
                .debug_tuple("Complete")
                .field(&String::from_utf8_lossy(body))
                .finish(),
            UpstreamReply::Streaming(_) => f.write_str("Streaming(..)"),
        }
    }
}

/// Base trait for chat completion upstreams.
///
/// One call is exactly one attempt: implementations surface non-success responses
/// as errors carrying the upstream status and body, and never retry.
#[async_trait]
pub trait ChatUpstream: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> RelayResult<UpstreamReply>;
}
