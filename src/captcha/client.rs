//! Synchronous HTTP client for the reCAPTCHA verification endpoint.
//!
//! The client POSTs the form-encoded token and secret to the provider's
//! siteverify endpoint, parses the verdict, and applies the decision rule.
//! Use it from async contexts via [`crate::captcha::RecaptchaVerifier`].

use crate::captcha::{passes, Verification};
use crate::config::Config;
use crate::error::{CaptchaError, CaptchaResult};
use crate::metrics::Metrics;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Verdict returned by the provider's siteverify endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteverifyResponse {
    /// Whether the token was valid for this secret
    pub success: bool,

    /// Risk score in [0, 1]; absent on malformed or v2 responses
    #[serde(default)]
    pub score: Option<f64>,

    /// Hostname of the site where the token was solved
    #[serde(default)]
    pub hostname: Option<String>,

    /// Action label the token was minted for
    #[serde(default)]
    pub action: Option<String>,

    /// Provider timestamp of the challenge
    #[serde(default)]
    pub challenge_ts: Option<String>,

    /// Provider error codes (API field: `error-codes`)
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

/// HTTP client for reCAPTCHA verification.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct RecaptchaClient {
    /// Verification endpoint URL
    verify_url: String,

    /// Server-side shared secret. Never logged.
    secret: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl RecaptchaClient {
    /// Create a new RecaptchaClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            verify_url: config.recaptcha_verify_url.clone(),
            secret: config.recaptcha_secret_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a RecaptchaClient with a custom endpoint (useful for testing).
    #[doc(hidden)]
    pub fn with_verify_url(verify_url: String, secret: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            verify_url,
            secret,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Verify a token against the provider and apply the decision rule.
    ///
    /// Fails with [`CaptchaError::MissingCredentials`] before any network
    /// call when the token or the configured secret is empty.
    pub fn verify(&self, token: &str) -> CaptchaResult<Verification> {
        if token.is_empty() || self.secret.is_empty() {
            return Err(CaptchaError::MissingCredentials);
        }

        let start = Instant::now();
        tracing::debug!("POST {}", self.verify_url);

        let result = self
            .agent
            .post(&self.verify_url)
            .send_form(&[("secret", self.secret.as_str()), ("response", token)])
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_http_error();
        }
        self.metrics.record_http_request(duration);

        let response = result?;
        let body = response
            .into_string()
            .map_err(|e| CaptchaError::Unreachable(e.to_string()))?;

        let verdict: SiteverifyResponse =
            serde_json::from_str(&body).map_err(|e| CaptchaError::Unreachable(e.to_string()))?;

        tracing::info!(
            "reCAPTCHA verdict: success={}, score={:?}, hostname={:?}, error_codes={:?}",
            verdict.success,
            verdict.score,
            verdict.hostname,
            verdict.error_codes
        );

        if passes(verdict.success, verdict.score) {
            Ok(Verification {
                score: verdict.score,
                hostname: verdict.hostname,
                action: verdict.action,
                challenge_ts: verdict.challenge_ts,
            })
        } else {
            Err(CaptchaError::Rejected {
                score: verdict.score,
                hostname: verdict.hostname,
                error_codes: verdict.error_codes,
            })
        }
    }

    /// Map a ureq error to a CaptchaError.
    fn map_error(&self, error: ureq::Error) -> CaptchaError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                CaptchaError::Unreachable(format!(
                    "verification endpoint returned {}: {}",
                    code, message
                ))
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    CaptchaError::Unreachable("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    CaptchaError::Unreachable("Request timed out".to_string())
                } else {
                    CaptchaError::Unreachable(transport.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_fails_before_network() {
        // Unroutable endpoint: a network attempt would fail differently
        let client =
            RecaptchaClient::with_verify_url("http://127.0.0.1:9".to_string(), "secret".to_string());

        let result = client.verify("");
        assert!(matches!(result, Err(CaptchaError::MissingCredentials)));
        assert_eq!(client.metrics().http_requests_total(), 0);
    }

    #[test]
    fn test_missing_secret_fails_before_network() {
        let client =
            RecaptchaClient::with_verify_url("http://127.0.0.1:9".to_string(), String::new());

        let result = client.verify("some-token");
        assert!(matches!(result, Err(CaptchaError::MissingCredentials)));
        assert_eq!(client.metrics().http_requests_total(), 0);
    }

    #[test]
    fn test_siteverify_response_parses_error_codes() {
        let json = r#"{
            "success": false,
            "error-codes": ["invalid-input-secret"]
        }"#;

        let verdict: SiteverifyResponse = serde_json::from_str(json).unwrap();
        assert!(!verdict.success);
        assert!(verdict.score.is_none());
        assert_eq!(verdict.error_codes, vec!["invalid-input-secret"]);
    }

    #[test]
    fn test_siteverify_response_parses_full_verdict() {
        let json = r#"{
            "success": true,
            "score": 0.9,
            "action": "contact_form_submit",
            "challenge_ts": "2025-02-01T10:00:00Z",
            "hostname": "suribarber.example"
        }"#;

        let verdict: SiteverifyResponse = serde_json::from_str(json).unwrap();
        assert!(verdict.success);
        assert_eq!(verdict.score, Some(0.9));
        assert_eq!(verdict.action.as_deref(), Some("contact_form_submit"));
        assert!(verdict.error_codes.is_empty());
    }
}
