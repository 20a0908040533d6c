//! Chat widget: keyword auto-replies, backend notifications and the
//! WhatsApp hand-off.

pub mod model;
pub mod notify;
pub mod replies;
pub mod session;
pub mod whatsapp;
pub mod ws;

pub use model::{ChatMessage, ClientFrame, Sender, ServerFrame};
pub use notify::{ChatNotification, ChatNotifier, HttpChatNotifier, NoopNotifier, forward};
pub use replies::{AutoReplyEngine, AutoReplyRule};
pub use session::{ChatSession, WELCOME_MESSAGE};
pub use whatsapp::{DEFAULT_PREFILL, whatsapp_link};
pub use ws::{ChatState, chat_routes};
