//! Quick callback enquiry from the landing page hero: name, grade, phone.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{Field, ValidationErrors};
use super::sanitize::sanitize;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Sanitized callback enquiry. Serialized as-is to the backend's `/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
    pub name: String,
    pub grade: String,
    pub phone: String,
}

/// Enquiry body as received over HTTP.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnquiry {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub grade: Value,
    #[serde(default)]
    pub phone: Value,
}

impl RawEnquiry {
    pub fn sanitized(&self) -> Enquiry {
        Enquiry {
            name: sanitize(&self.name),
            grade: sanitize(&self.grade),
            phone: sanitize(&self.phone),
        }
    }
}

/// Validate an enquiry whose fields have already been sanitized.
pub fn validate_enquiry(enquiry: &Enquiry) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if enquiry.name.is_empty() {
        errors.insert(Field::Name, "Name is required");
    }
    if enquiry.grade.is_empty() {
        errors.insert(Field::Grade, "Grade is required");
    }
    if enquiry.phone.is_empty() {
        errors.insert(Field::Phone, "Phone number is required");
    } else if !PHONE_PATTERN.is_match(&enquiry.phone) {
        errors.insert(Field::Phone, "Phone must be a 10-digit number");
    }

    errors
}
