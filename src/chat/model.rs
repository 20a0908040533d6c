//! Chat data model: messages and the `/ws/chat` JSON protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// One entry of a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub time: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            time: Utc::now(),
        }
    }
}

/// Frame from the browser → server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Message { content: String },
    SwitchToWhatsapp,
}

/// Frame from server → browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Full conversation, sent once on connect.
    History { messages: Vec<ChatMessage> },
    /// Bot is "typing"; the reply follows after the typing delay.
    Typing,
    Message { message: ChatMessage },
    Whatsapp { url: String },
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn client_frames_parse() {
        let frame: ClientFrame =
            serde_json::from_value(json!({"type": "message", "content": "hi"})).unwrap();
        assert!(matches!(frame, ClientFrame::Message { ref content } if content == "hi"));

        let frame: ClientFrame =
            serde_json::from_value(json!({"type": "switch_to_whatsapp"})).unwrap();
        assert!(matches!(frame, ClientFrame::SwitchToWhatsapp));
    }

    #[test]
    fn message_serializes_sender_lowercase() {
        let msg = ChatMessage::new("hello", Sender::User);
        let json = serde_json::to_value(ServerFrame::Message { message: msg }).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["message"]["sender"], "user");
        assert_eq!(json["message"]["text"], "hello");
    }

    #[test]
    fn ids_are_unique() {
        let a = ChatMessage::new("x", Sender::Bot);
        let b = ChatMessage::new("x", Sender::Bot);
        assert_ne!(a.id, b.id);
    }
}
