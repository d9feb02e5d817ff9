//! Synchronous HTTP client for the Supabase REST API.
//!
//! Inserts go to `{base}/rest/v1/{table}` as a single-element JSON array with
//! the project's anonymous key in both the `apikey` and `Authorization`
//! headers. Use it from async contexts via [`crate::store::SupabaseGateway`].

use crate::config::Config;
use crate::error::{PersistError, PersistResult};
use crate::metrics::Metrics;
use crate::models::SubmissionRow;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// HTTP client for the Supabase REST API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SupabaseClient {
    /// Supabase project base URL
    base_url: String,

    /// Anonymous key for authentication
    anon_key: String,

    /// Target table
    table: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl SupabaseClient {
    /// Create a new SupabaseClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            table: config.contact_table.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a SupabaseClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, anon_key: String, table: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            anon_key,
            table,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build the REST endpoint URL for the configured table.
    fn build_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/rest/v1/{}", base, self.table)
    }

    /// Insert one row into the contact table.
    ///
    /// The body is a single-element array, matching the REST API's bulk
    /// insert shape. `Prefer: return=minimal` suppresses any read-back.
    pub fn insert(&self, row: &SubmissionRow) -> PersistResult<()> {
        let url = self.build_url();
        let body = serde_json::to_value([row])?;

        tracing::debug!("POST {}", url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        let start = Instant::now();
        let result = self
            .agent
            .post(&url)
            .set("apikey", &self.anon_key)
            .set("Authorization", &format!("Bearer {}", self.anon_key))
            .set("Content-Type", "application/json")
            .set("Prefer", "return=minimal")
            .send_json(&body)
            .map_err(|e| self.map_error(e));

        let duration = start.elapsed();
        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                self.metrics.record_http_request(duration);
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                self.metrics.record_http_error();
                self.metrics.record_http_request(duration);
            }
        }

        result.map(|_| ())
    }

    /// Map a ureq error to a PersistError.
    fn map_error(&self, error: ureq::Error) -> PersistError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                PersistError::Rejected {
                    status: code,
                    message,
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    PersistError::Unreachable("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    PersistError::Unreachable("Request timed out".to_string())
                } else {
                    PersistError::Unreachable(transport.to_string())
                }
            }
        }
    }
}
