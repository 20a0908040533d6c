//! Best-effort forwarding of chat activity to the backend.
//!
//! Every visitor message (and the WhatsApp hand-off) is posted to
//! `{base}/chat-notification` from a detached task. Failures are logged and
//! dropped; the visitor never waits on this.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::model::{ChatMessage, Sender};
use crate::contact::model::iso_timestamp;
use crate::error::NotifyError;

pub const NOTIFICATION_SOURCE: &str = "website-chat";

/// Conversation entry as the backend expects it (no id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sender: Sender,
    pub time: DateTime<Utc>,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            text: msg.text.clone(),
            sender: msg.sender,
            time: msg.time,
        }
    }
}

/// Body of `POST /chat-notification`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatNotification {
    pub message: String,
    pub conversation_history: Vec<HistoryEntry>,
    pub timestamp: String,
    pub source: &'static str,
}

impl ChatNotification {
    pub fn new(message: impl Into<String>, history: &[ChatMessage]) -> Self {
        Self {
            message: message.into(),
            conversation_history: history.iter().map(HistoryEntry::from).collect(),
            timestamp: iso_timestamp(Utc::now()),
            source: NOTIFICATION_SOURCE,
        }
    }
}

/// Receiver of chat notifications.
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn notify(&self, notification: &ChatNotification) -> Result<(), NotifyError>;
}

/// Posts notifications to the backend. The response body is ignored.
pub struct HttpChatNotifier {
    base_url: String,
    client: reqwest::Client,
}

impl HttpChatNotifier {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl ChatNotifier for HttpChatNotifier {
    async fn notify(&self, notification: &ChatNotification) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(format!("{}/chat-notification", self.base_url))
            .json(notification)
            .send()
            .await
            .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(NotifyError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// Notifier that drops everything. Used when `MATH_KIDZ_CHAT_NOTIFICATIONS=false`.
pub struct NoopNotifier;

#[async_trait]
impl ChatNotifier for NoopNotifier {
    async fn notify(&self, _notification: &ChatNotification) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Fire-and-forget: send on a background task, log failures.
pub fn forward(notifier: Arc<dyn ChatNotifier>, notification: ChatNotification) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&notification).await {
            Ok(()) => debug!(
                history = notification.conversation_history.len(),
                "Chat notification forwarded"
            ),
            Err(e) => warn!(error = %e, "Chat notification failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FailingNotifier;

    #[async_trait]
    impl ChatNotifier for FailingNotifier {
        async fn notify(&self, _n: &ChatNotification) -> Result<(), NotifyError> {
            Err(NotifyError::Status(503))
        }
    }

    #[derive(Default)]
    struct Collecting(Mutex<Vec<ChatNotification>>);

    #[async_trait]
    impl ChatNotifier for Collecting {
        async fn notify(&self, n: &ChatNotification) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(n.clone());
            Ok(())
        }
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let history = vec![
            ChatMessage::new("Hello! 👋", Sender::Bot),
            ChatMessage::new("price?", Sender::User),
        ];
        let json = serde_json::to_value(ChatNotification::new("price?", &history)).unwrap();

        assert_eq!(json["message"], "price?");
        assert_eq!(json["source"], "website-chat");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
        let entries = json["conversationHistory"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1]["sender"], "user");
        assert!(entries[1].get("id").is_none());
    }

    #[tokio::test]
    async fn forward_delivers_in_background() {
        let collecting = Arc::new(Collecting::default());
        forward(collecting.clone(), ChatNotification::new("hi", &[]))
            .await
            .unwrap();
        assert_eq!(collecting.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn forward_swallows_failures() {
        let handle = forward(Arc::new(FailingNotifier), ChatNotification::new("hi", &[]));
        // Task completes normally; nothing propagates
        assert!(handle.await.is_ok());
    }
}
