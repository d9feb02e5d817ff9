//! Per-form-instance submission orchestrator.
//!
//! [`ContactFormController`] owns one draft [`ContactForm`] and drives a
//! submit pass through validation, two-phase CAPTCHA verification, and the
//! append-only store. The capabilities are injected; the controller holds no
//! global state and performs no automatic retries.
//!
//! A pass moves through `Idle -> Validating -> VerifyingCaptcha ->
//! Persisting` and always comes back to `Idle`, whatever the outcome. While
//! a pass is running, further submits return
//! [`SubmitOutcome::AlreadyInFlight`] without side effects.

use crate::captcha::{CaptchaVerifier, TokenProvider, CONTACT_FORM_ACTION};
use crate::error::{CaptchaError, SubmitError};
use crate::metrics::Metrics;
use crate::models::{ContactForm, SubmissionKind};
use crate::store::SubmissionGateway;
use crate::validation::{validate, FieldErrors};
use std::sync::{Arc, Mutex};

/// User-facing notice texts, rendered verbatim as toasts.
///
/// Failure texts vary by failure kind but never carry the shared secret or
/// raw provider payloads.
pub mod notices {
    pub const CAPTCHA_UNAVAILABLE: &str = "reCAPTCHA not available. Please refresh the page.";
    pub const CAPTCHA_NOT_STARTED: &str =
        "Verification could not be started. Please refresh and try again.";
    pub const CAPTCHA_REJECTED: &str = "Submission failed the spam check. Please try again.";
    pub const CAPTCHA_FAULT: &str = "Unexpected error occurred. Please try again.";
    pub const PERSIST_FAILED: &str = "Something went wrong. Please try again later.";
    pub const QUERY_ACCEPTED: &str = "Message sent successfully!";
    pub const APPOINTMENT_ACCEPTED: &str = "Appointment booked successfully!";
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// User-facing notification produced by a submit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity, for toast styling
    pub level: NoticeLevel,

    /// Verbatim text to display
    pub text: String,
}

impl Notice {
    pub fn success(text: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.to_string(),
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.to_string(),
        }
    }
}

/// Where a submit pass currently is.
///
/// Terminal outcomes are conveyed by [`SubmitOutcome`]; after every pass,
/// success or failure, the controller is back in `Idle` so the user can
/// retry by submitting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    VerifyingCaptcha,
    Persisting,
}

/// Result of one submit pass.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The draft failed validation. Field errors are for re-display; the
    /// draft is retained and no network call was made.
    Invalid(FieldErrors),

    /// Verification or persistence failed. The draft is retained so the
    /// user can retry without re-entering everything.
    Failed {
        /// What failed, for logs and programmatic handling
        error: SubmitError,
        /// What to show the user
        notice: Notice,
    },

    /// The submission was appended to the store. The draft was reset to its
    /// default state.
    Accepted {
        kind: SubmissionKind,
        notice: Notice,
    },

    /// Another submission was in flight; nothing happened.
    AlreadyInFlight,
}

/// Submission orchestrator for one contact form instance.
pub struct ContactFormController {
    tokens: Arc<dyn TokenProvider>,
    verifier: Arc<dyn CaptchaVerifier>,
    gateway: Arc<dyn SubmissionGateway>,
    draft: Mutex<ContactForm>,
    phase: Mutex<SubmitPhase>,
    metrics: Metrics,
}

impl ContactFormController {
    /// Create a controller with an empty draft and injected capabilities.
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        verifier: Arc<dyn CaptchaVerifier>,
        gateway: Arc<dyn SubmissionGateway>,
    ) -> Self {
        Self {
            tokens,
            verifier,
            gateway,
            draft: Mutex::new(ContactForm::default()),
            phase: Mutex::new(SubmitPhase::Idle),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> ContactForm {
        self.lock_draft().clone()
    }

    /// Replace the whole draft, as a controlled form does on every change.
    pub fn set_draft(&self, form: ContactForm) {
        *self.lock_draft() = form;
    }

    /// Edit the draft in place.
    pub fn update_draft<F: FnOnce(&mut ContactForm)>(&self, edit: F) {
        edit(&mut self.lock_draft());
    }

    /// Current phase of the submit pass.
    pub fn phase(&self) -> SubmitPhase {
        *self.lock_phase()
    }

    /// True while a submit pass is running. The UI reads this to disable
    /// the submit button.
    pub fn is_submitting(&self) -> bool {
        self.phase() != SubmitPhase::Idle
    }

    /// Run one submit pass over the current draft.
    ///
    /// At most one pass runs at a time per controller; a submit during a
    /// running pass returns [`SubmitOutcome::AlreadyInFlight`] untouched.
    pub async fn submit(&self) -> SubmitOutcome {
        if !self.try_begin() {
            self.metrics.record_duplicate_submit();
            tracing::debug!("submit ignored: another submission is in flight");
            return SubmitOutcome::AlreadyInFlight;
        }

        self.metrics.record_submission_attempted();
        let outcome = self.run_pipeline().await;
        self.set_phase(SubmitPhase::Idle);
        outcome
    }

    async fn run_pipeline(&self) -> SubmitOutcome {
        let draft = self.draft();

        let submission = match validate(&draft) {
            Ok(submission) => submission,
            Err(errors) => {
                self.metrics.record_submission_invalid();
                tracing::debug!("validation rejected draft: {} field error(s)", errors.len());
                return SubmitOutcome::Invalid(errors);
            }
        };

        self.set_phase(SubmitPhase::VerifyingCaptcha);

        let token = match self.tokens.acquire_token(CONTACT_FORM_ACTION).await {
            Ok(token) => token,
            Err(err) => return self.captcha_failed(err),
        };

        let verification = match self.verifier.verify(&token).await {
            Ok(verification) => verification,
            Err(err) => return self.captcha_failed(err),
        };

        tracing::info!(
            "captcha passed: score={:?}, hostname={:?}",
            verification.score,
            verification.hostname
        );

        self.set_phase(SubmitPhase::Persisting);

        if let Err(err) = self.gateway.append(&submission).await {
            self.metrics.record_persist_failure();
            tracing::error!("persistence failed: {}", err);
            return SubmitOutcome::Failed {
                error: SubmitError::Persist(err),
                notice: Notice::error(notices::PERSIST_FAILED),
            };
        }

        self.metrics.record_submission_persisted();
        let kind = submission.kind;
        tracing::info!("submission persisted: kind={}", kind);

        // Success clears the form back to its initial state.
        self.set_draft(ContactForm::default());

        let notice = match kind {
            SubmissionKind::Appointment => Notice::success(notices::APPOINTMENT_ACCEPTED),
            SubmissionKind::Query => Notice::success(notices::QUERY_ACCEPTED),
        };

        SubmitOutcome::Accepted { kind, notice }
    }

    fn captcha_failed(&self, err: CaptchaError) -> SubmitOutcome {
        self.metrics.record_captcha_denied();
        tracing::error!("captcha verification failed: {:?}", err);

        let notice = Notice::error(match &err {
            CaptchaError::Unavailable => notices::CAPTCHA_UNAVAILABLE,
            CaptchaError::MissingCredentials => notices::CAPTCHA_NOT_STARTED,
            CaptchaError::Rejected { .. } => notices::CAPTCHA_REJECTED,
            CaptchaError::Unreachable(_) => notices::CAPTCHA_FAULT,
        });

        SubmitOutcome::Failed {
            error: SubmitError::Captcha(err),
            notice,
        }
    }

    /// Atomically claim the in-flight slot.
    fn try_begin(&self) -> bool {
        let mut phase = self.lock_phase();
        if *phase != SubmitPhase::Idle {
            return false;
        }
        *phase = SubmitPhase::Validating;
        true
    }

    fn set_phase(&self, next: SubmitPhase) {
        *self.lock_phase() = next;
    }

    // Locks are held only for short, panic-free sections and never across an
    // await; a poisoned lock still yields the inner value so the draft
    // survives.
    fn lock_draft(&self) -> std::sync::MutexGuard<'_, ContactForm> {
        self.draft.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_phase(&self) -> std::sync::MutexGuard<'_, SubmitPhase> {
        self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }
}
