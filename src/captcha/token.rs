//! Phase 1: action-scoped token acquisition.

use crate::error::{CaptchaError, CaptchaResult};
use async_trait::async_trait;

/// Action label attached to every token minted for the contact form.
///
/// Embedders must pass this label to [`TokenProvider::acquire_token`] so the
/// provider scores all form submits under one action.
pub const CONTACT_FORM_ACTION: &str = "contact_form_submit";

/// Source of single-use, action-scoped CAPTCHA tokens.
///
/// In production this is backed by the provider's browser integration; in
/// tests it is mocked. Implementations must fail with
/// [`CaptchaError::Unavailable`] when the provider never initialized, so the
/// orchestrator can abort before any backend call.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a fresh token scoped to `action`.
    async fn acquire_token(&self, action: &str) -> CaptchaResult<String>;
}

/// Token source representing a provider that never initialized.
///
/// Every acquisition fails with [`CaptchaError::Unavailable`], matching the
/// behavior of a page where the provider script did not load.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTokenProvider;

#[async_trait]
impl TokenProvider for UnavailableTokenProvider {
    async fn acquire_token(&self, _action: &str) -> CaptchaResult<String> {
        Err(CaptchaError::Unavailable)
    }
}
