//! Async seam over the synchronous verification client.
//!
//! [`RecaptchaVerifier`] runs [`RecaptchaClient`] on the blocking thread pool
//! via `tokio::task::spawn_blocking`, so async callers suspend instead of
//! blocking the runtime during verification.

use crate::captcha::{RecaptchaClient, Verification};
use crate::error::{CaptchaError, CaptchaResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Phase 2 verification capability.
///
/// Given a Phase 1 token, decide whether the submission may proceed.
/// Implementations carry no state between invocations.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Verify a token; `Ok` means the submission may proceed to persistence.
    async fn verify(&self, token: &str) -> CaptchaResult<Verification>;
}

/// Production verifier backed by the reCAPTCHA siteverify endpoint.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: Arc<RecaptchaClient>,
}

impl RecaptchaVerifier {
    pub fn new(client: RecaptchaClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> CaptchaResult<Verification> {
        let client = self.client.clone();
        let token = token.to_string();

        tokio::task::spawn_blocking(move || client.verify(&token))
            .await
            .map_err(|e| CaptchaError::Unreachable(format!("Task join error: {}", e)))?
    }
}
