//! These models represent the objects passed through the relay
//!
//! There are three related formats we need to interact with:
//! - chat messages and attachments, sent from the study assistant to the relay
//! - openai-compatible chat completion messages, sent from the relay to the provider
//! - relay events, sent back from the relay to the study assistant as NDJSON
//!
//! Inbound messages already use the provider's message shape, so the message model
//! serializes directly into the upstream payload once attachments are merged.
pub mod attachment;
pub mod event;
pub mod message;
