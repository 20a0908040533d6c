//! REST boundary in front of the backend: `/api/contact` and `/api/enquiry`.
//!
//! Requests are sanitized and validated with the same rules as the form
//! before anything is forwarded.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::client::{ContactBackend, SuccessMessage};
use super::enquiry::{Enquiry, RawEnquiry, validate_enquiry};
use super::model::{ContactSubmission, RawContactForm, ValidationErrors};
use super::validate::validate_sanitized;
use crate::error::SubmissionError;

/// JSON reply of the contact endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ApiReply {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ApiReply {
    fn success(message: &str) -> Self {
        Self {
            status: "success",
            message: message.to_string(),
            errors: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
            errors: None,
        }
    }
}

#[derive(Clone)]
struct ContactState {
    backend: Arc<dyn ContactBackend>,
}

/// Build the router with the contact and enquiry endpoints.
pub fn contact_routes(backend: Arc<dyn ContactBackend>) -> Router {
    Router::new()
        .route("/api/contact", post(send_contact))
        .route("/api/enquiry", post(send_enquiry))
        .with_state(ContactState { backend })
}

async fn send_contact(
    State(state): State<ContactState>,
    body: Result<Json<RawContactForm>, JsonRejection>,
) -> Response {
    let Json(raw) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };

    let form = raw.sanitized();
    let errors = validate_sanitized(&form);
    if !errors.is_empty() {
        return invalid(errors);
    }

    let submission = ContactSubmission::stamp(form, Utc::now());
    info!(subject = %submission.subject, "Forwarding contact message");
    forwarded(state.backend.submit(&submission).await)
}

async fn send_enquiry(
    State(state): State<ContactState>,
    body: Result<Json<RawEnquiry>, JsonRejection>,
) -> Response {
    let Json(raw) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };

    let enquiry = raw.sanitized();
    let errors = validate_enquiry(&enquiry);
    if !errors.is_empty() {
        return invalid(errors);
    }

    info!(grade = %enquiry.grade, "Forwarding callback enquiry");
    forwarded(state.backend.submit_enquiry(&enquiry).await)
}

fn bad_body(rejection: JsonRejection) -> Response {
    debug!(error = %rejection.body_text(), "Unreadable request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiReply::error("Invalid request body")),
    )
        .into_response()
}

fn invalid(errors: ValidationErrors) -> Response {
    let message = errors
        .first_message()
        .unwrap_or("Invalid input")
        .to_string();
    debug!(fields = errors.len(), "Rejected invalid submission");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiReply {
            status: "error",
            message,
            errors: Some(errors),
        }),
    )
        .into_response()
}

/// Map the backend outcome onto the boundary's reply.
fn forwarded(result: Result<SuccessMessage, SubmissionError>) -> Response {
    match result {
        Ok(_) => Json(ApiReply::success("Message sent successfully!")).into_response(),
        Err(SubmissionError::Rejected { status, message }) => {
            // A 2xx without a success status is still a failed upstream call
            let code = StatusCode::from_u16(status)
                .ok()
                .filter(|c| c.is_client_error() || c.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            (code, Json(ApiReply::error(message))).into_response()
        }
        Err(SubmissionError::Transport(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiReply::error("Internal server error")),
        )
            .into_response(),
    }
}
