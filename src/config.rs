//! Configuration types.

use std::time::Duration;

use serde::Serialize;

use crate::contact::ContactFormState;
use crate::contact::gate::DEFAULT_COOLDOWN_MS;
use crate::error::ConfigError;

/// Production backend used when no override is configured.
pub const DEFAULT_BACKEND_API_URL: &str = "https://math-tuition-backend.vercel.app/api";

/// Site service configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL of the external backend (without trailing slash).
    pub backend_api_url: String,
    /// Port the HTTP/WS server binds to.
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    /// Minimum time between two successful contact submissions.
    pub submit_cooldown: Duration,
    /// Simulated "typing" delay before the chat bot answers.
    pub typing_delay: Duration,
    /// Timeout applied to every outbound backend request.
    pub http_timeout: Duration,
    /// Forward chat activity to `{backend}/chat-notification`.
    pub chat_notifications: bool,
    /// Public contact block shown on the site.
    pub contact: ContactDetails,
}

/// Business contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    /// WhatsApp number in international format, digits only.
    pub whatsapp_number: String,
    pub hours: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            email: "imtiazk4u@gmail.com".to_string(),
            phone: "+971 543014873".to_string(),
            whatsapp_number: "971543014873".to_string(),
            hours: "Mon - Sat, 10 AM - 8 PM".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
            submit_cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS as u64),
            typing_delay: Duration::from_millis(1000),
            http_timeout: Duration::from_secs(10),
            chat_notifications: true,
            contact: ContactDetails::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend_api_url = lookup("BACKEND_API_URL")
            .or_else(|| lookup("VITE_API_URL"))
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.backend_api_url);

        let port = parse_var(&lookup, "MATH_KIDZ_PORT")?.unwrap_or(defaults.port);

        let allowed_origins: Vec<String> = lookup("MATH_KIDZ_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let submit_cooldown = parse_var::<u64, _>(&lookup, "MATH_KIDZ_SUBMIT_COOLDOWN_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.submit_cooldown);

        let typing_delay = parse_var::<u64, _>(&lookup, "MATH_KIDZ_TYPING_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.typing_delay);

        let http_timeout = parse_var::<u64, _>(&lookup, "MATH_KIDZ_HTTP_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let chat_notifications = parse_var(&lookup, "MATH_KIDZ_CHAT_NOTIFICATIONS")?
            .unwrap_or(defaults.chat_notifications);

        let mut contact = defaults.contact;
        if let Some(number) = lookup("MATH_KIDZ_WHATSAPP_NUMBER") {
            let digits: String = number.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "MATH_KIDZ_WHATSAPP_NUMBER".to_string(),
                    message: format!("no digits in {number:?}"),
                });
            }
            contact.whatsapp_number = digits;
        }

        Ok(Self {
            backend_api_url,
            port,
            allowed_origins,
            submit_cooldown,
            typing_delay,
            http_timeout,
            chat_notifications,
            contact,
        })
    }

    /// A fresh contact form throttled by the configured cooldown.
    pub fn contact_form(&self) -> ContactFormState {
        ContactFormState::new(self.submit_cooldown)
    }

    /// Build the shared outbound HTTP client.
    pub fn http_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.http_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}
