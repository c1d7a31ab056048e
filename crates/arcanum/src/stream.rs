//! Stream reframing between the provider's SSE body and the relay's NDJSON body.
//!
//! The synchronous pieces (`decoder`, `lines`, `reframer`) own all buffering state
//! for exactly one stream; the functions here drive them from async byte streams.

mod decoder;
mod lines;
mod reframer;

pub use decoder::Utf8Decoder;
pub use lines::LineSplitter;
pub use reframer::{SseReframer, DEFAULT_MAX_LINE_BYTES};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};

use crate::errors::{RelayError, RelayResult};
use crate::models::event::RelayEvent;

/// Reframe an upstream SSE byte stream into relay events.
///
/// The upstream is dropped, closing its connection, as soon as the sentinel is
/// seen or the returned stream is dropped. A transport error or an ending in the
/// middle of a frame is yielded as the final item.
pub fn reframe<S>(
    mut upstream: S,
    max_line_bytes: usize,
) -> BoxStream<'static, RelayResult<RelayEvent>>
where
    S: Stream<Item = RelayResult<Bytes>> + Send + Unpin + 'static,
{
    Box::pin(async_stream::stream! {
        let mut reframer = SseReframer::new(max_line_bytes);
        while let Some(chunk) = upstream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            };
            for event in reframer.push(&chunk) {
                yield Ok(event);
            }
            if reframer.is_done() {
                break;
            }
        }
        if let Err(err) = reframer.finish() {
            yield Err(err);
        }
    })
}

/// Serialize relay events as NDJSON lines
pub fn ndjson<S>(events: S) -> BoxStream<'static, RelayResult<Bytes>>
where
    S: Stream<Item = RelayResult<RelayEvent>> + Send + 'static,
{
    events
        .map(|event| {
            event?
                .to_ndjson()
                .map_err(|e| RelayError::Internal(e.into()))
        })
        .boxed()
}
