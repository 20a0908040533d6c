//! Contact data model: raw form input, sanitized submissions, field errors.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sanitize::{sanitize, sanitize_str};

/// A form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Grade,
    Phone,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Subject => write!(f, "subject"),
            Self::Message => write!(f, "message"),
            Self::Grade => write!(f, "grade"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "subject" => Ok(Self::Subject),
            "message" => Ok(Self::Message),
            "grade" => Ok(Self::Grade),
            "phone" => Ok(Self::Phone),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// Raw contact form text as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Raw value of a contact field. Enquiry-only fields read as empty.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
            Field::Grade | Field::Phone => "",
        }
    }

    /// Replace a contact field. Returns `false` for fields the form does not have.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
            Field::Grade | Field::Phone => return false,
        };
        *slot = value;
        true
    }

    /// Copy with every field sanitized.
    pub fn sanitized(&self) -> Self {
        Self {
            name: sanitize_str(&self.name),
            email: sanitize_str(&self.email),
            subject: sanitize_str(&self.subject),
            message: sanitize_str(&self.message),
        }
    }
}

/// Contact form body as received over HTTP. Fields may be any JSON value;
/// anything that is not a string is treated as empty input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContactForm {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub email: Value,
    #[serde(default)]
    pub subject: Value,
    #[serde(default)]
    pub message: Value,
}

impl RawContactForm {
    /// Sanitize every field; non-string values become empty strings.
    pub fn sanitized(&self) -> ContactForm {
        ContactForm {
            name: sanitize(&self.name),
            email: sanitize(&self.email),
            subject: sanitize(&self.subject),
            message: sanitize(&self.message),
        }
    }
}

/// Sanitized payload sent to the backend's `/contact` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
}

impl ContactSubmission {
    /// Sanitize a form and stamp it with the submit time.
    pub fn from_form(form: &ContactForm, now: DateTime<Utc>) -> Self {
        Self::stamp(form.sanitized(), now)
    }

    /// Stamp an already sanitized form with the submit time.
    pub fn stamp(sanitized: ContactForm, now: DateTime<Utc>) -> Self {
        Self {
            name: sanitized.name,
            email: sanitized.email,
            subject: sanitized.subject,
            message: sanitized.message,
            timestamp: iso_timestamp(now),
        }
    }
}

/// Format a timestamp the way browsers' `toISOString` does.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Per-field validation messages. Empty means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Message of the first failing field in form order.
    pub fn first_message(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}
