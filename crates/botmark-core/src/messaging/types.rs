use serde::{Deserialize, Serialize};

use crate::{
    domain::{ChatId, MessageRef},
    keyboard::KeyboardLayout,
    markup::tags::Tag,
    Error, Result,
};

/// Attachment family, classified from the URL token's file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
}

impl MediaKind {
    /// Everything after the last `.`, lowercased. Unknown suffixes (or a
    /// query string glued onto the extension) classify as none, and the
    /// planner sends the URL as plain text instead.
    pub fn classify(url: &str) -> Option<MediaKind> {
        let ext = url.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "png" | "jpg" => Some(MediaKind::Photo),
            "mp4" => Some(MediaKind::Video),
            "mp3" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// What one planned message carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboundPayload {
    Text {
        body: String,
    },
    Media {
        kind: MediaKind,
        url: String,
        /// Only edit plans pair a caption with the media; send plans keep
        /// one segment per message.
        caption: Option<String>,
    },
}

/// One planned port call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub payload: OutboundPayload,
    pub keyboard: Option<KeyboardLayout>,
}

/// What the caller gets back after a reply is dispatched: the control tags
/// for state correlation plus the refs of everything sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub tags: Vec<Tag>,
    pub messages: Vec<MessageRef>,
}

/// One inbound platform update, reduced to what the bot reacts to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomingUpdate {
    /// A plain chat message.
    Text { chat_id: ChatId, text: String },
    /// A button press carrying the pressed button's action string.
    Callback { chat_id: ChatId, data: String },
}

impl IncomingUpdate {
    /// Parse a raw update. A `callback_query` member wins over `message`;
    /// anything else is unsupported.
    pub fn parse(raw: &str) -> Result<IncomingUpdate> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        if let Some(query) = value.get("callback_query") {
            let chat_id = query
                .get("message")
                .and_then(|m| m.get("chat"))
                .and_then(|c| c.get("id"))
                .and_then(serde_json::Value::as_i64);
            let data = query.get("data").and_then(serde_json::Value::as_str);
            return match (chat_id, data) {
                (Some(chat_id), Some(data)) => Ok(IncomingUpdate::Callback {
                    chat_id: ChatId(chat_id),
                    data: data.to_string(),
                }),
                _ => Err(Error::UnsupportedUpdate(
                    "callback_query without chat id or data".to_string(),
                )),
            };
        }

        if let Some(message) = value.get("message") {
            let chat_id = message
                .get("chat")
                .and_then(|c| c.get("id"))
                .and_then(serde_json::Value::as_i64);
            let text = message.get("text").and_then(serde_json::Value::as_str);
            return match (chat_id, text) {
                (Some(chat_id), Some(text)) => Ok(IncomingUpdate::Text {
                    chat_id: ChatId(chat_id),
                    text: text.to_string(),
                }),
                _ => Err(Error::UnsupportedUpdate(
                    "message without chat id or text".to_string(),
                )),
            };
        }

        Err(Error::UnsupportedUpdate(
            "neither message nor callback_query".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(MediaKind::classify("http://x.io/a.png"), Some(MediaKind::Photo));
        assert_eq!(MediaKind::classify("http://x.io/a.JPG"), Some(MediaKind::Photo));
        assert_eq!(MediaKind::classify("http://x.io/a.mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::classify("http://x.io/a.mp3"), Some(MediaKind::Audio));
    }

    #[test]
    fn unknown_or_mangled_extensions_classify_as_none() {
        assert_eq!(MediaKind::classify("http://x.io/a.pdf"), None);
        assert_eq!(MediaKind::classify("http://x.io/nodot"), None);
        assert_eq!(MediaKind::classify("http://x.io/a.png?size=2"), None);
    }

    #[test]
    fn parses_text_message_update() {
        let update =
            IncomingUpdate::parse(r#"{"message":{"chat":{"id":7},"text":"hi"}}"#).unwrap();
        assert_eq!(
            update,
            IncomingUpdate::Text {
                chat_id: ChatId(7),
                text: "hi".to_string()
            }
        );
    }

    #[test]
    fn parses_callback_query_update() {
        let raw = r#"{"callback_query":{"data":"checkout","message":{"chat":{"id":9}}}}"#;
        let update = IncomingUpdate::parse(raw).unwrap();
        assert_eq!(
            update,
            IncomingUpdate::Callback {
                chat_id: ChatId(9),
                data: "checkout".to_string()
            }
        );
    }

    #[test]
    fn callback_query_wins_over_message() {
        let raw = r#"{"message":{"chat":{"id":1},"text":"x"},"callback_query":{"data":"d","message":{"chat":{"id":2}}}}"#;
        let update = IncomingUpdate::parse(raw).unwrap();
        assert!(matches!(update, IncomingUpdate::Callback { chat_id: ChatId(2), .. }));
    }

    #[test]
    fn rejects_unknown_update_shape() {
        let err = IncomingUpdate::parse("{}").unwrap_err();
        assert!(matches!(err, Error::UnsupportedUpdate(_)));

        let err = IncomingUpdate::parse(r#"{"message":{"chat":{"id":7}}}"#).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUpdate(_)));
    }

    #[test]
    fn surfaces_json_errors() {
        let err = IncomingUpdate::parse("not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
