use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel payload the provider sends as its final SSE record
pub const DONE_SENTINEL: &str = "[DONE]";

/// A normalized event emitted to relay clients, one per NDJSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum RelayEvent {
    Reasoning(String),
    Content(String),
}

impl RelayEvent {
    /// Serialize as a single newline-terminated JSON line
    pub fn to_ndjson(&self) -> serde_json::Result<Bytes> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(Bytes::from(line))
    }
}

/// One provider SSE record, validated at the parse boundary.
///
/// Provider payloads are loosely shaped; fields that are missing, null, or of an
/// unexpected type are treated as absent rather than as errors. Only payloads that
/// are not JSON at all fail to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamEvent {
    Delta {
        reasoning: Option<String>,
        content: Option<String>,
    },
    Done,
}

impl UpstreamEvent {
    /// Parse the payload of a `data: ` line (prefix already stripped)
    pub fn parse(payload: &str) -> serde_json::Result<Self> {
        if payload.trim() == DONE_SENTINEL {
            return Ok(UpstreamEvent::Done);
        }

        let value: Value = serde_json::from_str(payload)?;
        let delta = &value["choices"][0]["delta"];
        let field = |name: &str| {
            delta
                .get(name)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(String::from)
        };

        Ok(UpstreamEvent::Delta {
            reasoning: field("reasoning"),
            content: field("content"),
        })
    }

    /// Relay events carried by this record, reasoning before content.
    pub fn into_relay_events(self) -> impl Iterator<Item = RelayEvent> {
        let (reasoning, content) = match self {
            UpstreamEvent::Delta { reasoning, content } => (reasoning, content),
            UpstreamEvent::Done => (None, None),
        };
        reasoning
            .map(RelayEvent::Reasoning)
            .into_iter()
            .chain(content.map(RelayEvent::Content))
    }
}
