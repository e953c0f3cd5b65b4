mod account;
mod account_summary;
mod job;
mod job_status;
mod schedule_request;

pub use account::{Account, AccountId, AccountUpdate, NewAccount};
pub use account_summary::AccountSummary;
pub use job::{Job, JobId};
pub use job_status::JobStatus;
pub use schedule_request::{compact_date, ScheduleRequest};
