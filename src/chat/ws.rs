//! `/ws/chat`: one auto-reply chat session per socket.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tracing::{debug, info, warn};

use super::model::{ClientFrame, ServerFrame};
use super::notify::ChatNotifier;
use super::replies::AutoReplyEngine;
use super::session::ChatSession;

/// Largest client frame accepted. Above the size of one capped chat message.
pub const MAX_FRAME_BYTES: usize = 16 * 1024;

/// Shared by every chat socket.
#[derive(Clone)]
pub struct ChatState {
    pub engine: Arc<AutoReplyEngine>,
    pub notifier: Arc<dyn ChatNotifier>,
    pub typing_delay: Duration,
    pub whatsapp_number: String,
}

impl ChatState {
    fn session(&self) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.engine),
            Arc::clone(&self.notifier),
            self.typing_delay,
            self.whatsapp_number.clone(),
        )
    }
}

pub fn chat_routes(state: ChatState) -> Router {
    Router::new()
        .route("/ws/chat", get(ws_handler))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<ChatState>) -> impl IntoResponse {
    info!("Chat client connecting");
    ws.max_message_size(MAX_FRAME_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state.session()))
}

/// Serialize and send one frame. `false` once the client is gone.
async fn send_frame(socket: &mut WebSocket, frame: &ServerFrame) -> bool {
    match serde_json::to_string(frame) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!(error = %e, "Failed to encode chat frame");
            true
        }
    }
}

async fn handle_socket(mut socket: WebSocket, mut session: ChatSession) {
    info!("Chat client connected");

    let history = ServerFrame::History {
        messages: session.messages().to_vec(),
    };
    if !send_frame(&mut socket, &history).await {
        warn!("Failed to send chat history, client disconnected");
        return;
    }

    while let Some(result) = socket.recv().await {
        match result {
            Ok(Message::Text(text)) => {
                if !handle_client_frame(&mut socket, &mut session, &text).await {
                    debug!("Client disconnected during send");
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("Chat client disconnected");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Chat WebSocket error");
                break;
            }
            _ => {}
        }
    }

    info!(messages = session.messages().len(), "Chat connection closed");
}

async fn handle_client_frame(socket: &mut WebSocket, session: &mut ChatSession, text: &str) -> bool {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            debug!(error = %e, text = text, "Unrecognized chat frame from client");
            let reply = ServerFrame::Error {
                message: "Unrecognized message".to_string(),
            };
            return send_frame(socket, &reply).await;
        }
    };

    match frame {
        ClientFrame::Message { content } => {
            let Some(user) = session.send(&content) else {
                return true;
            };
            if !send_frame(socket, &ServerFrame::Message { message: user.clone() }).await {
                return false;
            }
            if !send_frame(socket, &ServerFrame::Typing).await {
                return false;
            }
            tokio::time::sleep(session.typing_delay()).await;
            let reply = session.reply_to(&user);
            send_frame(socket, &ServerFrame::Message { message: reply }).await
        }
        ClientFrame::SwitchToWhatsapp => {
            let url = session.switch_to_whatsapp();
            send_frame(socket, &ServerFrame::Whatsapp { url }).await
        }
    }
}
