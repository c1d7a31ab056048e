use serde_json::{json, Value};

use super::configs::{MAX_TOKENS, REASONING_FORMAT, TEMPERATURE};
use crate::models::attachment::{Attachment, AttachmentKind};
use crate::models::message::{ChatMessage, ContentPart, MessageContent};

/// Fold attachments into the last message of a conversation.
///
/// Earlier messages pass through untouched. When there is at least one attachment,
/// the last message's content becomes a part list led by a text part:
/// - images are appended as image parts, in attachment order
/// - text and document attachments are prepended to the leading text part, so each
///   one lands ahead of everything merged before it
///
/// Attachments of unknown kind, and images without a data url, are skipped.
pub fn merge_attachments(
    mut messages: Vec<ChatMessage>,
    attachments: &[Attachment],
) -> Vec<ChatMessage> {
    if let Some(last) = messages.last_mut().filter(|_| !attachments.is_empty()) {
        let content = std::mem::replace(&mut last.content, MessageContent::Parts(Vec::new()));
        last.content = MessageContent::Parts(merge_into_parts(content, attachments));
    }
    messages
}

fn merge_into_parts(content: MessageContent, attachments: &[Attachment]) -> Vec<ContentPart> {
    let mut parts = content.into_parts();

    for attachment in attachments {
        match attachment.kind {
            AttachmentKind::Image => match attachment.data_url.as_deref() {
                Some(url) if !url.is_empty() => parts.push(ContentPart::image(url)),
                _ => tracing::debug!(name = %attachment.name, "image attachment has no data url"),
            },
            AttachmentKind::Text | AttachmentKind::Document => {
                if let Some(ContentPart::Text { text }) = parts.first_mut() {
                    *text = format!("{}{}", attached_file_block(attachment), text);
                }
            }
            AttachmentKind::Unknown => {
                tracing::debug!(name = %attachment.name, "skipping attachment of unknown kind")
            }
        }
    }
    parts
}

fn attached_file_block(attachment: &Attachment) -> String {
    format!(
        "Attached File: {}\n\n---\n{}\n---\n\n",
        attachment.name,
        attachment.text.as_deref().unwrap_or_default()
    )
}

/// Build the chat completion request body sent upstream
pub fn chat_completion_payload(model: &str, messages: &[ChatMessage], stream: bool) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "stream": stream,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
        "reasoning_format": REASONING_FORMAT,
    })
}
