//! Contact and appointment submission core for the Suri Barber Co. website.
//!
//! This library implements the booking form's backend-facing logic: schema
//! validation of raw drafts, two-phase reCAPTCHA verification, and an
//! append-only persistence gateway to Supabase, orchestrated per form
//! instance by [`ContactFormController`]. Page rendering and UI concerns
//! live in the embedding application, which owns the composition root.
//!
//! # Architecture
//!
//! - **models**: raw form draft, validated submission, persistence row shape
//! - **validation**: the field and cross-field rules of the contact form
//! - **captcha**: token acquisition and server-side verification
//! - **store**: Supabase REST client and the append-only gateway
//! - **form**: the submission orchestrator (state machine, notices)
//! - **domain**: validated value objects
//! - **error**: failure taxonomy for every stage
//! - **config**: configuration management from environment variables
//! - **metrics**: counters for submission flow and HTTP traffic
//! - **time**: wall-clock rendering of stored timestamps

// Re-export commonly used types
pub mod captcha;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod store;
pub mod time;
pub mod validation;

pub use captcha::{
    CaptchaVerifier, RecaptchaClient, RecaptchaVerifier, TokenProvider, Verification,
    VerifyRequest, VerifyResponse, CONTACT_FORM_ACTION, SCORE_THRESHOLD,
};
pub use config::Config;
pub use error::{CaptchaError, ConfigError, PersistError, SubmitError};
pub use form::{ContactFormController, Notice, NoticeLevel, SubmitOutcome, SubmitPhase};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ContactForm, ContactSubmission, Service, SubmissionKind, SubmissionRow};
pub use store::{SubmissionGateway, SupabaseClient, SupabaseGateway};
pub use validation::{validate, FieldErrors};
