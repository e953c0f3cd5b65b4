//! Partitioning of the flat job list into current-period and historical
//! buckets.

use chrono::{DateTime, Utc};

use crate::domain::{Job, JobStatus};

use super::cron_occurrence::{current_month_abbrev, next_occurrence_label};

/// Result of one classification pass. Ordering inside each bucket is the
/// status-descending order, stable over the input order, so downstream
/// grouping is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub current: Vec<Job>,
    pub historical: Vec<Job>,
}

/// Pure partition of `jobs` relative to the present calendar month in the
/// billing timezone. `now` is injected; the input is never mutated.
///
/// - A job is current when its anchored occurrence falls in the present
///   month, or unconditionally when it is failed or pending (unresolved
///   work always stays actionable).
/// - A job is historical only when completed with a resolvable occurrence
///   outside the present month.
/// - Completed jobs whose cron cannot be resolved are indeterminate and
///   land in neither bucket.
pub fn classify(jobs: &[Job], now: DateTime<Utc>) -> Classification {
    let month_abbrev = current_month_abbrev(now);

    let mut ordered: Vec<Job> = jobs.to_vec();
    ordered.sort_by(|a, b| b.status.as_str().cmp(a.status.as_str()));

    let mut classification = Classification::default();
    for job in ordered {
        let label = next_occurrence_label(&job.cron_expression, job.created_at, now);
        let is_current_month = label
            .as_deref()
            .map(|l| l.contains(month_abbrev))
            .unwrap_or(false);

        if is_current_month
            || job.status == JobStatus::Failed
            || job.status == JobStatus::Pending
        {
            classification.current.push(job);
        } else if job.status == JobStatus::Completed {
            if label.is_some() {
                classification.historical.push(job);
            } else {
                tracing::debug!(job_id = %job.id, "Dropping completed job with indeterminate cron");
            }
        } else {
            // Error-status jobs outside the present month carry nothing
            // actionable and nothing billable.
            tracing::debug!(job_id = %job.id, status = %job.status, "Job outside both buckets");
        }
    }

    classification
}
