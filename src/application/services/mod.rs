pub mod account_aggregator;
pub mod billing_service;
pub mod cron_occurrence;
pub mod job_classifier;
pub mod provisioning_workflow;
pub mod schedule_synthesizer;

pub use account_aggregator::{group_by_account, summarize};
pub use billing_service::{BillingError, BillingService, ACCOUNTS_CACHE_KEY, JOBS_CACHE_KEY};
pub use cron_occurrence::{next_occurrence_label, BILLING_TIMEZONE};
pub use job_classifier::{classify, Classification};
pub use provisioning_workflow::{PollConfig, ProvisioningError, ProvisioningWorkflow};
pub use schedule_synthesizer::{
    build_schedule_request, suggested_invoice_count, ScheduleInput, ValidationError,
};
