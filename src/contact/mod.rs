//! Contact intake pipeline: sanitize → validate → cooldown → backend → result.

pub mod client;
pub mod enquiry;
pub mod form;
pub mod gate;
pub mod model;
pub mod routes;
pub mod sanitize;
pub mod validate;

pub use client::{ContactBackend, HttpContactClient, SuccessMessage};
pub use enquiry::{Enquiry, RawEnquiry, validate_enquiry};
pub use form::{ContactFormState, StatusBanner, StatusKind, SubmitOutcome};
pub use gate::{GateDecision, SubmissionGate, can_submit};
pub use model::{ContactForm, ContactSubmission, Field, RawContactForm, ValidationErrors};
pub use routes::contact_routes;
pub use sanitize::{sanitize, sanitize_str};
pub use validate::{is_valid_email, validate};
