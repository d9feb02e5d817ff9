//! Submission orchestration for the contact form.

pub mod controller;

pub use controller::{
    notices, ContactFormController, Notice, NoticeLevel, SubmitOutcome, SubmitPhase,
};
