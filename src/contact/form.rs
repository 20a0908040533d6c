//! Contact form state: one instance per rendered form.
//!
//! Drives the intake pipeline for a single visitor: field edits clear the
//! matching error, submit runs gate → validation → backend, and the outcome
//! lands in a status banner. Form data survives every failure path.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::client::ContactBackend;
use super::gate::SubmissionGate;
use super::model::{ContactForm, ContactSubmission, Field, ValidationErrors};
use super::sanitize::MAX_FIELD_LENGTH;
use super::validate::validate;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

/// Severity of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// Dismissible banner above the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBanner {
    pub kind: StatusKind,
    pub message: String,
}

/// What a submit attempt ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Cooldown still running; nothing was sent.
    Throttled { remaining_seconds: u64 },
    /// Field errors; nothing was sent.
    Invalid,
    /// Backend confirmed receipt.
    Sent,
    /// Backend rejected or was unreachable; the visitor may retry.
    Failed,
}

/// State of one contact form instance.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    form: ContactForm,
    errors: ValidationErrors,
    status: Option<StatusBanner>,
    submitting: bool,
    submitted: bool,
    gate: SubmissionGate,
}

impl ContactFormState {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            errors: ValidationErrors::new(),
            status: None,
            submitting: false,
            submitted: false,
            gate: SubmissionGate::new(cooldown),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> Option<&StatusBanner> {
        self.status.as_ref()
    }

    pub fn cooldown(&self) -> Duration {
        self.gate.cooldown()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True once a submission went through, until [`reset`](Self::reset).
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Text under a field: its error, or the character counter for the message.
    pub fn helper_text(&self, field: Field) -> Option<String> {
        if let Some(err) = self.errors.get(field) {
            return Some(err.to_string());
        }
        (field == Field::Message)
            .then(|| format!("{}/{}", self.form.message.chars().count(), MAX_FIELD_LENGTH))
    }

    /// A field was edited: store it, clear its error and the banner.
    pub fn handle_change(&mut self, field: Field, value: impl Into<String>) {
        if self.form.set(field, value.into()) {
            self.errors.remove(field);
            self.status = None;
        }
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// "Send another message": leave the success view.
    pub fn reset(&mut self) {
        self.submitted = false;
        self.status = None;
    }

    /// Run one submit attempt at `now` against `backend`.
    ///
    /// Holding `&mut self` for the whole attempt is what keeps a second submit
    /// from starting while one is in flight.
    pub async fn handle_submit(
        &mut self,
        now: DateTime<Utc>,
        backend: &dyn ContactBackend,
    ) -> SubmitOutcome {
        let now_ms = now.timestamp_millis();

        let decision = self.gate.check(now_ms);
        if !decision.allowed {
            debug!(remaining = decision.remaining_seconds, "Submit blocked by cooldown");
            self.status = Some(StatusBanner {
                kind: StatusKind::Warning,
                message: format!(
                    "Please wait {} seconds before submitting again",
                    decision.remaining_seconds
                ),
            });
            return SubmitOutcome::Throttled {
                remaining_seconds: decision.remaining_seconds,
            };
        }

        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            debug!(fields = self.errors.len(), "Submit blocked by validation");
            return SubmitOutcome::Invalid;
        }

        self.submitting = true;
        self.status = None;

        let submission = ContactSubmission::from_form(&self.form, now);
        let result = backend.submit(&submission).await;

        self.submitting = false;

        match result {
            Ok(_) => {
                self.gate.record_success(now_ms);
                self.submitted = true;
                self.form = ContactForm::default();
                self.status = Some(StatusBanner {
                    kind: StatusKind::Success,
                    message: SUCCESS_MESSAGE.to_string(),
                });
                SubmitOutcome::Sent
            }
            Err(e) => {
                self.status = Some(StatusBanner {
                    kind: StatusKind::Error,
                    message: e.user_message().to_string(),
                });
                SubmitOutcome::Failed
            }
        }
    }
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new(SubmissionGate::default().cooldown())
    }
}
