//! Validation schema for the contact form.
//!
//! [`validate`] turns a raw [`ContactForm`] draft into a normalized
//! [`ContactSubmission`] or a [`FieldErrors`] collection carrying every
//! failure at once. It is pure and never panics on expected bad input.
//!
//! Rules run per field first, in a fixed precedence; within one field the
//! first failing rule ends that field's chain. The cross-field rules tying
//! `service` and `preferred_time` to the submission kind run only when every
//! per-field rule passed, so a draft never collects a cross-field error on
//! top of a syntax error.

use crate::domain::EmailAddress;
use crate::models::{ContactForm, ContactSubmission, Service, SubmissionKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

/// Field keys used in [`FieldErrors`], matching the form's own field names.
pub mod fields {
    pub const FULL_NAME: &str = "full_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const KIND: &str = "kind";
    pub const MESSAGE: &str = "message";
    pub const SERVICE: &str = "service";
    pub const PREFERRED_TIME: &str = "preferred_time";
}

/// User-facing validation messages, rendered verbatim next to each field.
pub mod messages {
    pub const FULL_NAME_REQUIRED: &str = "Full name is required";
    pub const EMAIL_INVALID: &str = "Invalid email address";
    pub const KIND_INVALID: &str = "Type must be either 'query' or 'appointment'";
    pub const MESSAGE_REQUIRED: &str = "Message is required";
    pub const PREFERRED_TIME_INVALID: &str = "Preferred time must be a valid date-time";
    pub const SERVICE_UNKNOWN: &str = "Service must be one of the listed offerings";
    pub const SERVICE_REQUIRED: &str = "Service is required when type is 'appointment'";
    pub const PREFERRED_TIME_REQUIRED: &str = "Preferred time is required for an appointment";
    pub const SERVICE_FORBIDDEN: &str = "Service must be empty when type is 'query'";
    pub const PREFERRED_TIME_FORBIDDEN: &str = "Preferred time must be empty for queries";
}

/// A single validation failure, tied to the field that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field key (see [`fields`])
    pub field: &'static str,

    /// Human-readable message, suitable for display next to the field
    pub message: &'static str,
}

/// All validation failures for one submit attempt, in rule evaluation order.
///
/// The caller can render every failure simultaneously; a field appears at
/// most once because its rule chain stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    /// Get the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Iterate over all failures in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no rule failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a raw draft into a normalized submission.
///
/// On success the returned [`ContactSubmission`] is normalized: the name is
/// trimmed, empty optional strings become `None`, and the preferred time is
/// parsed to a UTC instant. On failure every violated rule is reported.
pub fn validate(form: &ContactForm) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        errors.push(fields::FULL_NAME, messages::FULL_NAME_REQUIRED);
    }

    let email = match EmailAddress::new(form.email.clone()) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(fields::EMAIL, messages::EMAIL_INVALID);
            None
        }
    };

    // Phone is free-form; an empty string normalizes to absent.
    let phone = if form.phone.is_empty() {
        None
    } else {
        Some(form.phone.clone())
    };

    let kind = match SubmissionKind::parse(&form.kind) {
        Some(kind) => Some(kind),
        None => {
            errors.push(fields::KIND, messages::KIND_INVALID);
            None
        }
    };

    if form.message.is_empty() {
        errors.push(fields::MESSAGE, messages::MESSAGE_REQUIRED);
    }

    let preferred_time = if form.preferred_time.is_empty() {
        None
    } else {
        match parse_instant(&form.preferred_time) {
            Some(instant) => Some(instant),
            None => {
                errors.push(fields::PREFERRED_TIME, messages::PREFERRED_TIME_INVALID);
                None
            }
        }
    };

    let service = if form.service.is_empty() {
        None
    } else {
        match Service::parse(&form.service) {
            Some(service) => Some(service),
            None => {
                errors.push(fields::SERVICE, messages::SERVICE_UNKNOWN);
                None
            }
        }
    };

    // Cross-field rules run only on a draft whose per-field rules all passed.
    // Both appointment requirements can fire independently.
    if errors.is_empty() {
        match kind {
            Some(SubmissionKind::Appointment) => {
                if service.is_none() {
                    errors.push(fields::SERVICE, messages::SERVICE_REQUIRED);
                }
                if preferred_time.is_none() {
                    errors.push(fields::PREFERRED_TIME, messages::PREFERRED_TIME_REQUIRED);
                }
            }
            Some(SubmissionKind::Query) => {
                if service.is_some() {
                    errors.push(fields::SERVICE, messages::SERVICE_FORBIDDEN);
                }
                if preferred_time.is_some() {
                    errors.push(fields::PREFERRED_TIME, messages::PREFERRED_TIME_FORBIDDEN);
                }
            }
            None => {}
        }
    }

    match (email, kind) {
        (Some(email), Some(kind)) if errors.is_empty() => Ok(ContactSubmission {
            full_name: full_name.to_string(),
            email,
            phone,
            kind,
            service,
            preferred_time,
            message: form.message.clone(),
        }),
        _ => Err(errors),
    }
}

/// Parse a preferred-time string as a real instant.
///
/// Accepted grammars, tried in order: RFC 3339, a naive local stamp as the
/// browser's `datetime-local` input emits (`%Y-%m-%dT%H:%M`, seconds
/// optional), and a bare date (midnight). Naive stamps are taken as UTC.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}
