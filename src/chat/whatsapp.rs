//! WhatsApp hand-off link.

/// Text pre-filled when a visitor continues on WhatsApp.
pub const DEFAULT_PREFILL: &str = "Hi! I'm interested in math tuition for my child.";

/// `https://wa.me/{number}?text={encoded}` deep link.
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(text))
}
