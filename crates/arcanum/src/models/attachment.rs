use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Text,
    Document,
    /// Any kind the relay does not know how to merge; dropped during merging
    #[serde(other)]
    Unknown,
}

/// A file the user attached to the last message, already resolved client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Attachment {
    pub fn image<S: Into<String>, U: Into<String>>(name: S, data_url: U) -> Self {
        Attachment {
            kind: AttachmentKind::Image,
            name: name.into(),
            data_url: Some(data_url.into()),
            text: None,
        }
    }

    pub fn text<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Attachment {
            kind: AttachmentKind::Text,
            name: name.into(),
            data_url: None,
            text: Some(text.into()),
        }
    }

    pub fn document<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        Attachment {
            kind: AttachmentKind::Document,
            ..Attachment::text(name, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_client_shape() {
        let attachment: Attachment = serde_json::from_value(json!({
            "type": "image",
            "name": "diagram.png",
            "dataUrl": "data:image/png;base64,AAA"
        }))
        .unwrap();
        assert_eq!(attachment, Attachment::image("diagram.png", "data:image/png;base64,AAA"));
    }

    #[test]
    fn test_unknown_kind_deserializes() {
        let attachment: Attachment =
            serde_json::from_value(json!({"type": "audio", "name": "memo.mp3"})).unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Unknown);
        assert_eq!(attachment.text, None);
    }
}
