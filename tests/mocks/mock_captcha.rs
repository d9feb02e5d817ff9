use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use suri_contact::captcha::{CaptchaVerifier, TokenProvider, Verification};
use suri_contact::error::{CaptchaError, CaptchaResult};

/// Mock token provider for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockTokenProvider {
    token: Arc<Mutex<Option<String>>>,
    last_action: Arc<Mutex<Option<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockTokenProvider {
    /// Provider that always hands out `mock-token`.
    pub fn new() -> Self {
        Self {
            token: Arc::new(Mutex::new(Some("mock-token".to_string()))),
            last_action: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Provider that fails every acquisition, as when the widget never loaded.
    pub fn unavailable() -> Self {
        Self {
            token: Arc::new(Mutex::new(None)),
            last_action: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn set_token(&self, token: &str) {
        let mut guard = self.token.lock().unwrap();
        *guard = Some(token.to_string());
    }

    /// The action label passed to the most recent acquisition.
    pub fn last_action(&self) -> Option<String> {
        self.last_action.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenProvider for MockTokenProvider {
    async fn acquire_token(&self, action: &str) -> CaptchaResult<String> {
        self.track_call("acquire_token");

        let mut last = self.last_action.lock().unwrap();
        *last = Some(action.to_string());
        drop(last);

        let token = self.token.lock().unwrap();
        match token.as_ref() {
            Some(token) => Ok(token.clone()),
            None => Err(CaptchaError::Unavailable),
        }
    }
}

/// What the mock verifier answers with.
#[allow(dead_code)]
#[derive(Clone)]
enum Verdict {
    Pass(Verification),
    Reject {
        score: Option<f64>,
        hostname: Option<String>,
        error_codes: Vec<String>,
    },
    MissingCredentials,
    Fault(String),
}

/// Mock captcha verifier for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockCaptchaVerifier {
    verdict: Arc<Mutex<Verdict>>,
    delay: Arc<Mutex<Option<Duration>>>,
    last_token: Arc<Mutex<Option<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockCaptchaVerifier {
    /// Verifier that passes everything with a confident score.
    pub fn passing() -> Self {
        Self::with_verdict(Verdict::Pass(Verification {
            score: Some(0.9),
            hostname: Some("suribarber.example".to_string()),
            action: Some("contact_form_submit".to_string()),
            challenge_ts: None,
        }))
    }

    /// Verifier that rejects everything, reporting `score` back.
    pub fn rejecting(score: Option<f64>) -> Self {
        Self::with_verdict(Verdict::Reject {
            score,
            hostname: Some("suribarber.example".to_string()),
            error_codes: Vec::new(),
        })
    }

    /// Verifier that rejects with provider error codes and no score.
    pub fn rejecting_with_codes(error_codes: Vec<String>) -> Self {
        Self::with_verdict(Verdict::Reject {
            score: None,
            hostname: None,
            error_codes,
        })
    }

    /// Verifier that refuses to start, as when the token or secret is empty.
    pub fn missing_credentials() -> Self {
        Self::with_verdict(Verdict::MissingCredentials)
    }

    /// Verifier that fails with a transport fault.
    pub fn faulting(detail: &str) -> Self {
        Self::with_verdict(Verdict::Fault(detail.to_string()))
    }

    fn with_verdict(verdict: Verdict) -> Self {
        Self {
            verdict: Arc::new(Mutex::new(verdict)),
            delay: Arc::new(Mutex::new(None)),
            last_token: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Make every verification sleep first. Used to hold a submission in
    /// flight while another one is attempted.
    pub fn set_delay(&self, delay: Duration) {
        let mut guard = self.delay.lock().unwrap();
        *guard = Some(delay);
    }

    /// The token passed to the most recent verification.
    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl CaptchaVerifier for MockCaptchaVerifier {
    async fn verify(&self, token: &str) -> CaptchaResult<Verification> {
        self.track_call("verify");

        {
            let mut last = self.last_token.lock().unwrap();
            *last = Some(token.to_string());
        }

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let verdict = self.verdict.lock().unwrap().clone();
        match verdict {
            Verdict::Pass(verification) => Ok(verification),
            Verdict::Reject {
                score,
                hostname,
                error_codes,
            } => Err(CaptchaError::Rejected {
                score,
                hostname,
                error_codes,
            }),
            Verdict::MissingCredentials => Err(CaptchaError::MissingCredentials),
            Verdict::Fault(detail) => Err(CaptchaError::Unreachable(detail)),
        }
    }
}
