use std::ops::ControlFlow;

use super::lines::LineSplitter;
use crate::errors::{RelayError, RelayResult};
use crate::models::event::{RelayEvent, UpstreamEvent};

const DATA_PREFIX: &str = "data: ";

/// Default bound on one buffered, not yet terminated SSE line
pub const DEFAULT_MAX_LINE_BYTES: usize = 1024 * 1024;

/// Turns provider SSE bytes into relay events.
///
/// The reframer is a synchronous state machine fed one chunk at a time; it never
/// waits for data itself. Chunks may split lines, JSON payloads, or UTF-8 sequences
/// anywhere, and the emitted events do not depend on where the splits fall.
///
/// Per line:
/// - lines without the `data: ` prefix (comments, keep-alives, blank separators) are ignored
/// - `data: [DONE]` ends the stream; nothing after it is interpreted
/// - a payload that is not JSON is logged and skipped
/// - otherwise `choices[0].delta` yields a reasoning event and then a content event,
///   each only when present and non-empty
#[derive(Debug)]
pub struct SseReframer {
    lines: LineSplitter,
    done: bool,
}

impl Default for SseReframer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_BYTES)
    }
}

impl SseReframer {
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            lines: LineSplitter::new(max_line_bytes),
            done: false,
        }
    }

    /// True once the `[DONE]` sentinel has been seen
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk of the upstream body, returning the events it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<RelayEvent> {
        let mut events = Vec::new();
        if self.done {
            return events;
        }

        for line in self.lines.push(chunk) {
            if handle_line(&line, &mut events).is_break() {
                self.done = true;
                break;
            }
        }
        events
    }

    /// Signal end of input.
    ///
    /// Ending on the sentinel, or cleanly between lines, is normal completion.
    /// Ending with a partial line still buffered means the upstream was cut off
    /// mid-frame.
    pub fn finish(&mut self) -> RelayResult<()> {
        if self.done {
            return Ok(());
        }
        match self.lines.finish() {
            None => {
                tracing::debug!("upstream stream ended without sentinel");
                Ok(())
            }
            Some(rest) => Err(RelayError::TruncatedStream(format!(
                "input ended inside a frame ({} bytes pending)",
                rest.len()
            ))),
        }
    }
}

fn handle_line(line: &str, events: &mut Vec<RelayEvent>) -> ControlFlow<()> {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return ControlFlow::Continue(());
    };

    match UpstreamEvent::parse(payload) {
        Ok(UpstreamEvent::Done) => {
            tracing::debug!("upstream stream reached sentinel");
            return ControlFlow::Break(());
        }
        Ok(event) => events.extend(event.into_relay_events()),
        Err(source) => {
            let err = RelayError::MalformedFrame {
                payload: payload.to_string(),
                source,
            };
            tracing::warn!(error = %err, "skipping malformed stream frame");
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(text: &str) -> RelayEvent {
        RelayEvent::Content(text.to_string())
    }

    fn reasoning(text: &str) -> RelayEvent {
        RelayEvent::Reasoning(text.to_string())
    }

    #[test]
    fn test_single_content_line() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n");
        assert_eq!(events, vec![content("hi")]);
        assert!(reframer.finish().is_ok());
    }

    #[test]
    fn test_reasoning_precedes_content() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(
            b"data: {\"choices\":[{\"delta\":{\"reasoning\":\"think\",\"content\":\"hi\"}}]}\n",
        );
        assert_eq!(events, vec![reasoning("think"), content("hi")]);
    }

    #[test]
    fn test_line_waits_for_newline() {
        let mut reframer = SseReframer::default();
        assert!(reframer
            .push(b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}")
            .is_empty());
        assert_eq!(reframer.push(b"\n"), vec![content("hi")]);
    }

    #[test]
    fn test_done_stops_processing() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n\
              data: [DONE]\n\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\n",
        );
        assert_eq!(events, vec![content("a")]);
        assert!(reframer.is_done());

        let later = reframer.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"c\"}}]}\n");
        assert!(later.is_empty());
        assert!(reframer.finish().is_ok());
    }

    #[test]
    fn test_done_with_partial_remainder_is_clean() {
        let mut reframer = SseReframer::default();
        reframer.push(b"data: [DONE]\ndata: {\"cho");
        assert!(reframer.is_done());
        assert!(reframer.finish().is_ok());
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"one\"}}]}\n\
              data: {not json\n\
              data: {\"choices\":[{\"delta\":{\"content\":\"two\"}}]}\n",
        );
        assert_eq!(events, vec![content("one"), content("two")]);
        assert!(!reframer.is_done());
    }

    #[test]
    fn test_non_data_lines_are_ignored() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(
            b": keep-alive\n\
              event: message\n\
              data:{\"choices\":[{\"delta\":{\"content\":\"no space\"}}]}\n\
              \n\
              data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n",
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_crlf_framing() {
        let mut reframer = SseReframer::default();
        let events = reframer.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\r\n\r\ndata: [DONE]\r\n\r\n",
        );
        assert_eq!(events, vec![content("hi")]);
        assert!(reframer.is_done());
    }

    #[test]
    fn test_clean_end_without_sentinel() {
        let mut reframer = SseReframer::default();
        reframer.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"hi\"}}]}\n\n");
        assert!(reframer.finish().is_ok());
    }

    #[test]
    fn test_end_mid_frame_is_truncation() {
        let mut reframer = SseReframer::default();
        reframer.push(b"data: {\"choices\":[{\"delta\":{\"content\":\"h");
        assert!(matches!(
            reframer.finish(),
            Err(RelayError::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_multibyte_split_across_chunks() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"ñandú 🦤\"}}]}\n".as_bytes();
        let emoji = "🦤".as_bytes();
        let split = line.windows(emoji.len()).position(|w| w == emoji).unwrap() + 2;
        let mut reframer = SseReframer::default();
        assert!(reframer.push(&line[..split]).is_empty());
        assert_eq!(reframer.push(&line[split..]), vec![content("ñandú 🦤")]);
    }
}
