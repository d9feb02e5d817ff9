use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use suri_contact::error::{PersistError, PersistResult};
use suri_contact::models::ContactSubmission;
use suri_contact::store::SubmissionGateway;

/// How the mock gateway answers an append.
#[allow(dead_code)]
#[derive(Clone)]
enum StoreMode {
    Accept,
    Reject { status: u16, message: String },
    Unreachable(String),
}

/// Mock submission gateway for testing. Accepted submissions are kept so
/// tests can inspect exactly what would have been written.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockSubmissionGateway {
    submissions: Arc<Mutex<Vec<ContactSubmission>>>,
    mode: Arc<Mutex<StoreMode>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockSubmissionGateway {
    /// Gateway that accepts every append.
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            mode: Arc::new(Mutex::new(StoreMode::Accept)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Gateway whose store rejects every insert with `status`.
    pub fn rejecting(status: u16, message: &str) -> Self {
        let gateway = Self::new();
        {
            let mut mode = gateway.mode.lock().unwrap();
            *mode = StoreMode::Reject {
                status,
                message: message.to_string(),
            };
        }
        gateway
    }

    /// Gateway whose store never answers.
    pub fn unreachable(detail: &str) -> Self {
        let gateway = Self::new();
        {
            let mut mode = gateway.mode.lock().unwrap();
            *mode = StoreMode::Unreachable(detail.to_string());
        }
        gateway
    }

    /// Everything appended so far, in order.
    pub fn appended(&self) -> Vec<ContactSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    pub fn clear(&self) {
        let mut submissions = self.submissions.lock().unwrap();
        submissions.clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockSubmissionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionGateway for MockSubmissionGateway {
    async fn append(&self, submission: &ContactSubmission) -> PersistResult<()> {
        self.track_call("append");

        let mode = self.mode.lock().unwrap().clone();
        match mode {
            StoreMode::Accept => {
                let mut submissions = self.submissions.lock().unwrap();
                submissions.push(submission.clone());
                Ok(())
            }
            StoreMode::Reject { status, message } => {
                Err(PersistError::Rejected { status, message })
            }
            StoreMode::Unreachable(detail) => Err(PersistError::Unreachable(detail)),
        }
    }
}
