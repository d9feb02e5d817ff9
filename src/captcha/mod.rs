//! Two-phase reCAPTCHA verification.
//!
//! Phase 1 acquires an action-scoped token from the provider integration
//! ([`TokenProvider`]); Phase 2 sends the token and the confidential secret
//! to the verification endpoint and applies the decision rule
//! ([`CaptchaVerifier`]). Both phases must pass before anything is persisted.
//!
//! The synchronous [`RecaptchaClient`] does the Phase 2 HTTP work and can be
//! used from async contexts through [`RecaptchaVerifier`], which runs it via
//! `tokio::task::spawn_blocking`.

pub mod client;
pub mod token;
pub mod verifier;

pub use client::{RecaptchaClient, SiteverifyResponse};
pub use token::{TokenProvider, UnavailableTokenProvider, CONTACT_FORM_ACTION};
pub use verifier::{CaptchaVerifier, RecaptchaVerifier};

use crate::error::{CaptchaError, CaptchaResult};
use serde::{Deserialize, Serialize};

/// Minimum risk score accepted by the decision rule.
pub const SCORE_THRESHOLD: f64 = 0.5;

/// Decision rule for a provider verdict.
///
/// Passes iff the provider reported success and the score clears
/// [`SCORE_THRESHOLD`]. The comparison is `>=`, so exactly 0.5 passes.
/// A missing score never passes.
pub fn passes(success: bool, score: Option<f64>) -> bool {
    success && score.map_or(false, |s| s >= SCORE_THRESHOLD)
}

/// Details of a passed verification, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verification {
    /// Risk score in [0, 1]; higher means more human-like
    pub score: Option<f64>,

    /// Hostname of the site where the token was solved
    pub hostname: Option<String>,

    /// Action label echoed back by the provider
    pub action: Option<String>,

    /// Provider timestamp of the challenge
    pub challenge_ts: Option<String>,
}

/// Wire shape accepted by the embedding application's verification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyRequest {
    /// Phase 1 token to verify
    pub token: String,
}

/// Wire shape of the embedding application's verification endpoint.
///
/// The body carries the outcome; [`status_code`](Self::status_code) gives the
/// HTTP status to send with it. Failure messages are the generic ones shown
/// to callers; internal transport detail never appears here.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    /// HTTP status paired with this body
    #[serde(skip)]
    status: u16,

    /// Whether verification passed
    pub success: bool,

    /// Human-readable failure message (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Provider risk score, when one was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Provider-reported hostname, when one was returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Provider error codes on rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl VerifyResponse {
    /// Build the endpoint response for a verification outcome.
    pub fn from_outcome(outcome: &CaptchaResult<Verification>) -> Self {
        match outcome {
            Ok(verification) => Self {
                status: 200,
                success: true,
                message: None,
                score: verification.score,
                hostname: verification.hostname.clone(),
                errors: None,
            },
            Err(err) => {
                let status = match err {
                    CaptchaError::Unavailable | CaptchaError::MissingCredentials => 400,
                    CaptchaError::Rejected { .. } => 403,
                    CaptchaError::Unreachable(_) => 500,
                };

                let (score, hostname, errors) = match err {
                    CaptchaError::Rejected {
                        score,
                        hostname,
                        error_codes,
                    } => (
                        *score,
                        hostname.clone(),
                        if error_codes.is_empty() {
                            None
                        } else {
                            Some(error_codes.clone())
                        },
                    ),
                    _ => (None, None, None),
                };

                Self {
                    status,
                    success: false,
                    message: Some(err.to_string()),
                    score,
                    hostname,
                    errors,
                }
            }
        }
    }

    /// HTTP status paired with this body.
    pub fn status_code(&self) -> u16 {
        self.status
    }
}
