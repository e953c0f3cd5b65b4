//! Orchestrator owning the classified billing state.
//!
//! The classification and aggregation passes are pure functions; this
//! service owns their inputs and results, and drives every mutation in the
//! order: backend call, cache invalidation, re-fetch, reclassification.
//!
//! Concurrent triggering of the same mutation (double-click retry) is not
//! deduplicated here; callers are expected to debounce.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{AccountBackend, BackendError, JobBackend, PauseOutcome};
use crate::domain::{Account, AccountId, AccountSummary, Job, JobId, JobStatus};
use crate::infrastructure::cache::ResponseCache;

use super::account_aggregator::{group_by_account, summarize};
use super::cron_occurrence::BILLING_TIMEZONE;
use super::job_classifier::classify;
use super::schedule_synthesizer::{build_schedule_request, ScheduleInput, ValidationError};

pub const JOBS_CACHE_KEY: &str = "jobs";
pub const ACCOUNTS_CACHE_KEY: &str = "accounts";

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("backend: {0}")]
    Backend(#[from] BackendError),
    #[error("retry of job {job_id} failed with status {status}: {message}")]
    RetryFailed {
        job_id: JobId,
        status: u16,
        message: String,
    },
    #[error("job id must be positive")]
    InvalidJobId,
    #[error("job {0} is not in the current period")]
    UnknownJob(JobId),
    #[error("account {0} has no jobs to pause")]
    NothingToPause(AccountId),
}

pub struct BillingService {
    job_backend: Arc<dyn JobBackend>,
    account_backend: Arc<dyn AccountBackend>,
    cache: Arc<ResponseCache>,
    accounts: Vec<Account>,
    current: BTreeMap<AccountId, Vec<Job>>,
    historical: BTreeMap<AccountId, Vec<Job>>,
}

impl BillingService {
    pub fn new(
        job_backend: Arc<dyn JobBackend>,
        account_backend: Arc<dyn AccountBackend>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            job_backend,
            account_backend,
            cache,
            accounts: Vec::new(),
            current: BTreeMap::new(),
            historical: BTreeMap::new(),
        }
    }

    /// Fetch jobs and accounts (through the cache unless `force_refresh`),
    /// then reclassify and regroup. Backend failures propagate; an empty
    /// result only ever means the backend returned an empty list.
    pub async fn refresh(
        &mut self,
        now: DateTime<Utc>,
        force_refresh: bool,
    ) -> Result<(), BillingError> {
        let jobs = match (!force_refresh)
            .then(|| self.cache.get::<Vec<Job>>(JOBS_CACHE_KEY))
            .flatten()
        {
            Some(jobs) => jobs,
            None => {
                let jobs = self.job_backend.list(None).await?;
                self.cache.set(JOBS_CACHE_KEY, &jobs, None);
                jobs
            }
        };

        let accounts = match (!force_refresh)
            .then(|| self.cache.get::<Vec<Account>>(ACCOUNTS_CACHE_KEY))
            .flatten()
        {
            Some(accounts) => accounts,
            None => {
                let accounts = self.account_backend.list().await?;
                self.cache.set(ACCOUNTS_CACHE_KEY, &accounts, None);
                accounts
            }
        };

        let classification = classify(&jobs, now);
        self.current = group_by_account(&classification.current);
        self.historical = group_by_account(&classification.historical);
        self.accounts = accounts;

        tracing::debug!(
            current_accounts = self.current.len(),
            historical_accounts = self.historical.len(),
            "Billing state refreshed"
        );
        Ok(())
    }

    pub fn current_groups(&self) -> &BTreeMap<AccountId, Vec<Job>> {
        &self.current
    }

    pub fn historical_groups(&self) -> &BTreeMap<AccountId, Vec<Job>> {
        &self.historical
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn summaries(&self, now: DateTime<Utc>) -> Vec<AccountSummary> {
        summarize(&self.current, &self.accounts, now)
    }

    pub fn historical_summaries(&self, now: DateTime<Utc>) -> Vec<AccountSummary> {
        summarize(&self.historical, &self.accounts, now)
    }

    /// Validate the input, create the schedule on the backend, then
    /// invalidate and rebuild the local state.
    pub async fn create_schedule(
        &mut self,
        input: &ScheduleInput,
        now: DateTime<Utc>,
    ) -> Result<Job, BillingError> {
        let today = now.with_timezone(&BILLING_TIMEZONE).date_naive();
        let request = build_schedule_request(input, today)?;

        let job = self.job_backend.create(&request).await?;
        tracing::info!(job_id = %job.id, account_id = %job.account_id, "Schedule created");

        self.cache.clear(Some(JOBS_CACHE_KEY));
        self.refresh(now, true).await?;
        Ok(job)
    }

    /// Execute one job again on the backend. HTTP 201 confirms the invoice
    /// was generated and flips the job to completed in the current group;
    /// any other response leaves the state untouched and surfaces the
    /// failure. There is no automatic retry of a failed retry.
    pub async fn retry_job(&mut self, job_id: JobId) -> Result<(), BillingError> {
        if job_id.value() <= 0 {
            return Err(BillingError::InvalidJobId);
        }
        let account_id = self
            .current
            .iter()
            .find(|(_, jobs)| jobs.iter().any(|j| j.id == job_id))
            .map(|(&id, _)| id)
            .ok_or(BillingError::UnknownJob(job_id))?;

        let outcome = self.job_backend.retry(job_id).await?;
        if !outcome.succeeded() {
            return Err(BillingError::RetryFailed {
                job_id,
                status: outcome.http_status,
                message: outcome.message,
            });
        }

        if let Some(jobs) = self.current.get_mut(&account_id) {
            for job in jobs.iter_mut().filter(|j| j.id == job_id) {
                job.status = JobStatus::Completed;
            }
        }
        self.cache.clear(Some(JOBS_CACHE_KEY));
        tracing::info!(%job_id, "Job retried and completed");
        Ok(())
    }

    /// Stop future billing for one account: pause every current-period job
    /// and, on backend confirmation, mark all non-completed ones failed.
    /// Completed jobs keep their history.
    pub async fn pause_account(&mut self, account_id: AccountId) -> Result<(), BillingError> {
        let job_ids: Vec<JobId> = self
            .current
            .get(&account_id)
            .map(|jobs| jobs.iter().map(|j| j.id).collect())
            .unwrap_or_default();
        if job_ids.is_empty() {
            return Err(BillingError::NothingToPause(account_id));
        }

        let PauseOutcome { message } = self.job_backend.pause_many(&job_ids).await?;
        tracing::info!(%account_id, paused = job_ids.len(), %message, "Billing paused");

        if let Some(jobs) = self.current.get_mut(&account_id) {
            for job in jobs.iter_mut() {
                job.status = job.status.after_pause();
            }
        }
        self.cache.clear(Some(JOBS_CACHE_KEY));
        Ok(())
    }

    /// Remove an account and all of its jobs, remote first, then locally.
    pub async fn delete_account(&mut self, account_id: AccountId) -> Result<(), BillingError> {
        self.job_backend.delete_all_for_account(account_id).await?;
        self.account_backend.delete(account_id).await?;

        self.cache.clear(Some(JOBS_CACHE_KEY));
        self.cache.clear(Some(ACCOUNTS_CACHE_KEY));
        self.current.remove(&account_id);
        self.historical.remove(&account_id);
        self.accounts.retain(|a| a.id != account_id);

        tracing::info!(%account_id, "Account and jobs deleted");
        Ok(())
    }
}
