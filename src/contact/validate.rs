//! Shared contact form validation.
//!
//! The same rules back the interactive form state and the `/api/contact`
//! boundary. Every field is checked independently, so a single call reports
//! all problems at once.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{ContactForm, Field, ValidationErrors};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_SUBJECT_LENGTH: usize = 3;
pub const MIN_MESSAGE_LENGTH: usize = 10;
pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Conservative address check: `local@domain.tld`, ASCII only, at most 254 chars.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
}

/// Validate raw form input. Fields are sanitized before any rule runs.
pub fn validate(form: &ContactForm) -> ValidationErrors {
    validate_sanitized(&form.sanitized())
}

/// Validate a form whose fields have already been sanitized.
pub fn validate_sanitized(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.name.is_empty() {
        errors.insert(Field::Name, "Full name is required");
    } else if form.name.chars().count() < MIN_NAME_LENGTH {
        errors.insert(Field::Name, "Name must be at least 2 characters");
    }

    if form.email.is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !is_valid_email(&form.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    if form.subject.is_empty() {
        errors.insert(Field::Subject, "Subject is required");
    } else if form.subject.chars().count() < MIN_SUBJECT_LENGTH {
        errors.insert(Field::Subject, "Subject must be at least 3 characters");
    }

    if form.message.is_empty() {
        errors.insert(Field::Message, "Message is required");
    } else if form.message.chars().count() < MIN_MESSAGE_LENGTH {
        errors.insert(Field::Message, "Message must be at least 10 characters");
    }

    errors
}
