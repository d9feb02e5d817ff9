//! Async append-only gateway over the synchronous Supabase client.

use crate::error::{PersistError, PersistResult};
use crate::models::{ContactSubmission, SubmissionRow};
use crate::store::SupabaseClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only persistence capability.
///
/// Exactly one insert per successful submission; no upsert, no read-back.
/// Any backend error is rejected upward as a [`PersistError`], never
/// silently dropped.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Append one submission to the store.
    async fn append(&self, submission: &ContactSubmission) -> PersistResult<()>;
}

/// Production gateway backed by the Supabase REST API.
#[derive(Clone)]
pub struct SupabaseGateway {
    client: Arc<SupabaseClient>,
}

impl SupabaseGateway {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl SubmissionGateway for SupabaseGateway {
    async fn append(&self, submission: &ContactSubmission) -> PersistResult<()> {
        let client = self.client.clone();
        let row = SubmissionRow::from(submission);

        tokio::task::spawn_blocking(move || client.insert(&row))
            .await
            .map_err(|e| PersistError::Unreachable(format!("Task join error: {}", e)))?
    }
}
