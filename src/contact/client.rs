//! Backend client: forwards sanitized submissions to `{base}/contact`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::enquiry::Enquiry;
use super::model::ContactSubmission;
use crate::error::SubmissionError;

/// Message shown when the backend rejects a submission without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Confirmation returned by the backend on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessMessage(pub String);

/// JSON body the backend answers with.
#[derive(Debug, Default, Deserialize)]
struct BackendReply {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Destination for contact and enquiry submissions.
#[async_trait]
pub trait ContactBackend: Send + Sync {
    /// Deliver a contact form submission. Exactly one attempt, no retry.
    async fn submit(&self, submission: &ContactSubmission)
    -> Result<SuccessMessage, SubmissionError>;

    /// Deliver a callback enquiry.
    async fn submit_enquiry(
        &self,
        enquiry: &Enquiry,
    ) -> Result<SuccessMessage, SubmissionError>;
}

/// HTTP implementation talking to the external backend API.
pub struct HttpContactClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContactClient {
    pub fn new(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn contact_url(&self) -> String {
        format!("{}/contact", self.base_url)
    }

    async fn post_contact<T: Serialize + Sync>(
        &self,
        kind: &str,
        body: &T,
    ) -> Result<SuccessMessage, SubmissionError> {
        let result = self.try_post(body).await;
        match &result {
            Ok(_) => info!(kind, "Submission accepted by backend"),
            Err(SubmissionError::Rejected { status, message }) => {
                warn!(kind, status, message = %message, "Backend rejected submission")
            }
            Err(SubmissionError::Transport(reason)) => {
                error!(kind, error = %reason, "Submission failed to reach backend")
            }
        }
        result
    }

    async fn try_post<T: Serialize + Sync>(
        &self,
        body: &T,
    ) -> Result<SuccessMessage, SubmissionError> {
        let resp = self.client.post(self.contact_url()).json(body).send().await?;

        let status = resp.status();
        let reply: BackendReply = resp.json().await?;

        if status.is_success() && reply.status.as_deref() == Some("success") {
            return Ok(SuccessMessage(
                reply
                    .message
                    .unwrap_or_else(|| "Message sent successfully!".to_string()),
            ));
        }

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message: reply
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        })
    }
}

#[async_trait]
impl ContactBackend for HttpContactClient {
    async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SuccessMessage, SubmissionError> {
        self.post_contact("contact", submission).await
    }

    async fn submit_enquiry(
        &self,
        enquiry: &Enquiry,
    ) -> Result<SuccessMessage, SubmissionError> {
        self.post_contact("enquiry", enquiry).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve a fixed reply on `/contact`, recording every request body.
    async fn stub_backend(
        status: StatusCode,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<Value>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let app = Router::new().route(
            "/contact",
            post(move |Json(payload): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().unwrap().push(payload);
                    (status, [("content-type", "application/json")], body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://127.0.0.1:{port}"), seen)
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jo".into(),
            email: "a@b.co".into(),
            subject: "Hi!".into(),
            message: "1234567890".into(),
            timestamp: "2025-03-01T09:30:00.000Z".into(),
        }
    }

    #[tokio::test]
    async fn success_requires_status_field() {
        let (base, seen) = stub_backend(StatusCode::OK, r#"{"status":"success"}"#).await;
        let client = HttpContactClient::new(base, reqwest::Client::new());

        let result = client.submit(&submission()).await.unwrap();
        assert_eq!(result, SuccessMessage("Message sent successfully!".into()));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            json!({
                "name": "Jo",
                "email": "a@b.co",
                "subject": "Hi!",
                "message": "1234567890",
                "timestamp": "2025-03-01T09:30:00.000Z"
            })
        );
    }

    #[tokio::test]
    async fn ok_response_without_success_status_is_rejected() {
        let (base, _) =
            stub_backend(StatusCode::OK, r#"{"status":"error","message":"Mailbox full"}"#).await;
        let client = HttpContactClient::new(base, reqwest::Client::new());

        match client.submit(&submission()).await {
            Err(SubmissionError::Rejected { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Mailbox full");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn http_error_falls_back_to_generic_message() {
        let (base, _) = stub_backend(StatusCode::SERVICE_UNAVAILABLE, r#"{"status":"success"}"#).await;
        let client = HttpContactClient::new(base, reqwest::Client::new());

        match client.submit(&submission()).await {
            Err(SubmissionError::Rejected { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, GENERIC_FAILURE_MESSAGE);
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn enquiry_needs_2xx_even_when_body_says_success() {
        let (base, seen) =
            stub_backend(StatusCode::INTERNAL_SERVER_ERROR, r#"{"status":"success"}"#).await;
        let client = HttpContactClient::new(base, reqwest::Client::new());
        let enquiry = Enquiry {
            name: "Sara".into(),
            grade: "Grade 5".into(),
            phone: "0501234567".into(),
        };

        match client.submit_enquiry(&enquiry).await {
            Err(SubmissionError::Rejected { status, .. }) => assert_eq!(status, 500),
            other => panic!("Expected Rejected, got {:?}", other),
        }
        assert_eq!(
            seen.lock().unwrap()[0],
            json!({"name": "Sara", "grade": "Grade 5", "phone": "0501234567"})
        );
    }

    #[tokio::test]
    async fn non_json_body_is_transport_failure() {
        let (base, _) = stub_backend(StatusCode::OK, "<html>oops</html>").await;
        let client = HttpContactClient::new(base, reqwest::Client::new());

        let err = client.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_failure() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HttpContactClient::new(format!("http://127.0.0.1:{port}/"), reqwest::Client::new());
        let err = client.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
    }
}
