use async_trait::async_trait;

use crate::domain::{AccountId, Job, JobId, ScheduleRequest};

use super::BackendError;

/// Result of a synchronous retry execution on the backend. The raw HTTP
/// status is part of the contract: 201 means the invoice was generated.
#[derive(Debug, Clone)]
pub struct RetryOutcome {
    pub http_status: u16,
    pub message: String,
}

impl RetryOutcome {
    pub fn succeeded(&self) -> bool {
        self.http_status == 201
    }
}

#[derive(Debug, Clone)]
pub struct PauseOutcome {
    pub message: String,
}

/// Remote job backend: creates, retries, pauses and deletes invoice jobs.
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn list(&self, account: Option<AccountId>) -> Result<Vec<Job>, BackendError>;

    async fn create(&self, request: &ScheduleRequest) -> Result<Job, BackendError>;

    async fn retry(&self, job_id: JobId) -> Result<RetryOutcome, BackendError>;

    async fn pause_many(&self, job_ids: &[JobId]) -> Result<PauseOutcome, BackendError>;

    async fn delete_all_for_account(&self, account_id: AccountId) -> Result<(), BackendError>;
}
