//! One chat widget conversation.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::model::{ChatMessage, Sender};
use super::notify::{ChatNotification, ChatNotifier, forward};
use super::replies::AutoReplyEngine;
use super::whatsapp::{DEFAULT_PREFILL, whatsapp_link};
use crate::contact::sanitize::MAX_FIELD_LENGTH;

pub const WELCOME_MESSAGE: &str = "Hello! 👋 Welcome to Math Kidz! How can I help you today?";

/// Visitor messages longer than this are cut to this many characters.
pub const MAX_MESSAGE_CHARS: usize = MAX_FIELD_LENGTH;

/// Messages kept per conversation; the oldest are dropped first.
pub const MAX_HISTORY: usize = 50;

/// Notification text recorded when the visitor moves to WhatsApp.
pub const WHATSAPP_SWITCH_NOTICE: &str = "[Visitor switched to WhatsApp]";

/// Conversation state owned by a single visitor connection.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    engine: Arc<AutoReplyEngine>,
    notifier: Arc<dyn ChatNotifier>,
    typing_delay: Duration,
    whatsapp_number: String,
}

impl ChatSession {
    /// Start a conversation seeded with the bot's welcome message.
    pub fn new(
        engine: Arc<AutoReplyEngine>,
        notifier: Arc<dyn ChatNotifier>,
        typing_delay: Duration,
        whatsapp_number: impl Into<String>,
    ) -> Self {
        Self {
            messages: vec![ChatMessage::new(WELCOME_MESSAGE, Sender::Bot)],
            engine,
            notifier,
            typing_delay,
            whatsapp_number: whatsapp_number.into(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// Record a visitor message and forward it. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let text: String = text.chars().take(MAX_MESSAGE_CHARS).collect();
        let msg = ChatMessage::new(text, Sender::User);
        self.push(msg.clone());
        forward(
            Arc::clone(&self.notifier),
            ChatNotification::new(msg.text.clone(), &self.messages),
        );
        Some(msg)
    }

    /// Append the canned reply to a visitor message.
    pub fn reply_to(&mut self, user_message: &ChatMessage) -> ChatMessage {
        let reply = ChatMessage::new(self.engine.reply(&user_message.text), Sender::Bot);
        self.push(reply.clone());
        reply
    }

    fn push(&mut self, msg: ChatMessage) {
        self.messages.push(msg);
        if self.messages.len() > MAX_HISTORY {
            let excess = self.messages.len() - MAX_HISTORY;
            self.messages.drain(..excess);
        }
    }

    /// Send, wait out the typing delay, then reply.
    pub async fn respond(&mut self, text: &str) -> Option<ChatMessage> {
        let user = self.send(text)?;
        tokio::time::sleep(self.typing_delay).await;
        Some(self.reply_to(&user))
    }

    /// WhatsApp deep link for continuing the conversation. Forwards a notice.
    pub fn switch_to_whatsapp(&self) -> String {
        info!(messages = self.messages.len(), "Visitor switching to WhatsApp");
        forward(
            Arc::clone(&self.notifier),
            ChatNotification::new(WHATSAPP_SWITCH_NOTICE, &self.messages),
        );
        whatsapp_link(&self.whatsapp_number, DEFAULT_PREFILL)
    }
}
