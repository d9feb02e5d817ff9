//! Error types for the contact submission core.
//!
//! This module defines custom error types using `thiserror` for precise error
//! handling. Validation failures are not errors in this sense: they are
//! ordinary values (`validation::FieldErrors`) returned to the caller for
//! re-display.

use thiserror::Error;

/// Errors that can occur while obtaining or verifying a reCAPTCHA token.
#[derive(Error, Debug)]
pub enum CaptchaError {
    /// The provider integration is not initialized on the client side.
    /// Submission must be aborted before any backend call is made.
    #[error("reCAPTCHA not available")]
    Unavailable,

    /// No client token or no server secret; nothing was sent upstream.
    /// HTTP-equivalent 400.
    #[error("Missing token or secret key.")]
    MissingCredentials,

    /// The provider reported failure or the score fell below the threshold.
    /// HTTP-equivalent 403. Carries the provider's returned details so the
    /// rejection stays observable.
    #[error("reCAPTCHA verification failed")]
    Rejected {
        score: Option<f64>,
        hostname: Option<String>,
        error_codes: Vec<String>,
    },

    /// Transport or parse fault while talking to the provider.
    /// HTTP-equivalent 500.
    #[error("Server error during reCAPTCHA validation.")]
    Unreachable(String),
}

/// Errors that can occur while appending a submission to the store.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The store rejected the insert with an error status.
    #[error("store rejected the record (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport fault or timeout before a response arrived.
    #[error("store request failed: {0}")]
    Unreachable(String),

    /// The row could not be encoded as JSON.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Remote failures surfaced by the submission flow after validation passed.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Token acquisition or verification failed.
    #[error("verification failed: {0}")]
    Captcha(#[from] CaptchaError),

    /// The persistence gateway reported an error.
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with CaptchaError
pub type CaptchaResult<T> = Result<T, CaptchaError>;

/// Convenience type alias for Results with PersistError
pub type PersistResult<T> = Result<T, PersistError>;

/// Convenience type alias for Results with SubmitError
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
