//! Data models for contact and appointment submissions.
//!
//! This module contains the raw form draft, the validated submission entity,
//! and the wire shape persisted to the contact table.

pub mod submission;

pub use submission::{ContactForm, ContactSubmission, Service, SubmissionKind, SubmissionRow};
