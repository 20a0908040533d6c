//! Router assembly: health, contact info, contact intake and chat.

use std::sync::Arc;

use axum::{Json, Router, http::HeaderValue, response::IntoResponse, routing::get};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::chat::whatsapp::DEFAULT_PREFILL;
use crate::chat::{
    AutoReplyEngine, ChatNotifier, ChatState, HttpChatNotifier, NoopNotifier, chat_routes,
    whatsapp_link,
};
use crate::config::{ContactDetails, SiteConfig};
use crate::contact::{ContactBackend, HttpContactClient, contact_routes};
use crate::error;

/// `GET /api/contact-info` body.
#[derive(Debug, Clone, Serialize)]
struct ContactInfo {
    #[serde(flatten)]
    details: ContactDetails,
    whatsapp_link: String,
}

/// Build the full site router.
pub fn build_app(
    config: &SiteConfig,
    backend: Arc<dyn ContactBackend>,
    notifier: Arc<dyn ChatNotifier>,
) -> Router {
    let chat = ChatState {
        engine: Arc::new(AutoReplyEngine::default_rules()),
        notifier,
        typing_delay: config.typing_delay,
        whatsapp_number: config.contact.whatsapp_number.clone(),
    };

    let info = ContactInfo {
        whatsapp_link: whatsapp_link(&config.contact.whatsapp_number, DEFAULT_PREFILL),
        details: config.contact.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/contact-info", get(move || async move { Json(info) }))
        .merge(contact_routes(backend))
        .merge(chat_routes(chat))
        .layer(cors_layer(&config.allowed_origins))
}

/// Wire the HTTP backend clients, bind `0.0.0.0:{port}` and serve until ctrl-c.
pub async fn serve(config: SiteConfig) -> error::Result<()> {
    let http = config.http_client()?;
    let backend = Arc::new(HttpContactClient::new(
        config.backend_api_url.clone(),
        http.clone(),
    ));
    let notifier: Arc<dyn ChatNotifier> = if config.chat_notifications {
        Arc::new(HttpChatNotifier::new(config.backend_api_url.clone(), http))
    } else {
        info!("Chat notifications disabled");
        Arc::new(NoopNotifier)
    };
    let app = build_app(&config, backend, notifier);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!(port = config.port, "Math Kidz server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "math-kidz"
    }))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
