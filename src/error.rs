//! Error types for the Math Kidz site service.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures of a single contact/enquiry submission to the backend.
///
/// Every variant is recoverable: the caller keeps the form data and the user
/// may retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The backend answered but did not report success.
    #[error("Backend rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a usable answer (network, timeout, bad JSON).
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl SubmissionError {
    /// Message shown to the user in the status banner.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(_) => NETWORK_ERROR_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

/// User-facing text for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Chat notification forwarding errors. Always logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    RequestFailed(String),

    #[error("Notification endpoint returned HTTP {0}")]
    Status(u16),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
