use arcanum::errors::RelayError;
use arcanum::models::event::RelayEvent;
use arcanum::stream::{SseReframer, DEFAULT_MAX_LINE_BYTES};

/// A realistic provider stream: role-only preamble, keep-alive comment, CRLF and LF
/// framing, multi-byte text, a garbled frame, both delta kinds, trailing bytes after
/// the sentinel.
const STREAM: &str = concat!(
    ": connected\n\n",
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"reasoning\":\"The user asks about \"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"reasoning\":\"entropy — ΔS ≥ 0.\"}}]}\r\n\r\n",
    "data: {\"choices\":[{\"delta\":{\"reasoning\":\"done\",\"content\":\"Entropy \"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\"\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"never decreases 🔥\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
    "data: [DONE]\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
);

fn expected() -> Vec<RelayEvent> {
    vec![
        RelayEvent::Reasoning("The user asks about ".into()),
        RelayEvent::Reasoning("entropy — ΔS ≥ 0.".into()),
        RelayEvent::Reasoning("done".into()),
        RelayEvent::Content("Entropy ".into()),
        RelayEvent::Content("never decreases 🔥".into()),
    ]
}

fn run(chunks: &[&[u8]]) -> (Vec<RelayEvent>, Result<(), RelayError>) {
    let mut reframer = SseReframer::new(DEFAULT_MAX_LINE_BYTES);
    let mut events = Vec::new();
    for chunk in chunks {
        events.extend(reframer.push(chunk));
    }
    let end = reframer.finish();
    (events, end)
}

#[test]
fn events_do_not_depend_on_a_single_split_point() {
    let bytes = STREAM.as_bytes();
    for split in 0..=bytes.len() {
        let (events, end) = run(&[&bytes[..split], &bytes[split..]]);
        assert_eq!(events, expected(), "split at byte {split}");
        assert!(end.is_ok(), "split at byte {split}");
    }
}

#[test]
fn events_do_not_depend_on_two_split_points() {
    let bytes = STREAM.as_bytes();
    for first in (0..=bytes.len()).step_by(7) {
        for second in first..=bytes.len() {
            let (events, end) = run(&[&bytes[..first], &bytes[first..second], &bytes[second..]]);
            assert_eq!(events, expected(), "splits at {first} and {second}");
            assert!(end.is_ok());
        }
    }
}

#[test]
fn events_survive_byte_at_a_time_delivery() {
    let chunks: Vec<&[u8]> = STREAM.as_bytes().chunks(1).collect();
    let (events, end) = run(&chunks);
    assert_eq!(events, expected());
    assert!(end.is_ok());
}

#[test]
fn connection_cut_mid_frame_is_distinguished_from_completion() {
    let cut = STREAM.find("never").unwrap();
    let (events, end) = run(&[&STREAM.as_bytes()[..cut]]);
    assert_eq!(events, expected()[..4].to_vec());
    assert!(matches!(end, Err(RelayError::TruncatedStream(_))));
}
