use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use serde_json::Value;

use crate::errors::RelayResult;
use crate::models::event::RelayEvent;
use crate::stream::LineSplitter;

const NO_RESPONSE: &str = "No response";

/// The assembled answer of one relay call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub reasoning: String,
}

impl ChatReply {
    pub fn apply(&mut self, event: &RelayEvent) {
        match event {
            RelayEvent::Reasoning(text) => self.reasoning.push_str(text),
            RelayEvent::Content(text) => self.text.push_str(text),
        }
    }

    /// Read the answer out of a buffered (non-streaming) completion body
    pub fn from_completion(completion: &Value) -> Self {
        let message = &completion["choices"][0]["message"];
        let text = message["content"]
            .as_str()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_RESPONSE)
            .to_string();
        let reasoning = message["reasoning"].as_str().unwrap_or_default().to_string();
        Self { text, reasoning }
    }
}

/// Incremental decoder for the relay's NDJSON output.
///
/// Blank lines and lines that are not relay events are ignored.
#[derive(Debug)]
pub struct NdjsonDecoder {
    lines: LineSplitter,
}

impl Default for NdjsonDecoder {
    fn default() -> Self {
        Self {
            lines: LineSplitter::new(usize::MAX),
        }
    }
}

impl NdjsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<RelayEvent> {
        self.lines
            .push(chunk)
            .iter()
            .filter_map(|line| parse_event(line))
            .collect()
    }

    /// Decode a final line that arrived without its newline
    pub fn finish(&mut self) -> Option<RelayEvent> {
        self.lines.finish().as_deref().and_then(parse_event)
    }
}

fn parse_event(line: &str) -> Option<RelayEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    serde_json::from_str(line).ok()
}

/// Fold a relay NDJSON body into a reply, reporting every event as it arrives.
pub async fn collect_reply<S, F>(mut body: S, mut on_event: F) -> RelayResult<ChatReply>
where
    S: Stream<Item = RelayResult<Bytes>> + Unpin,
    F: FnMut(&RelayEvent),
{
    let mut decoder = NdjsonDecoder::new();
    let mut reply = ChatReply::default();

    while let Some(chunk) = body.next().await {
        for event in decoder.push(&chunk?) {
            on_event(&event);
            reply.apply(&event);
        }
    }
    if let Some(event) = decoder.finish() {
        on_event(&event);
        reply.apply(&event);
    }
    Ok(reply)
}
