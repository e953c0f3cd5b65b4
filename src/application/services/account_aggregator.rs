//! Per-account aggregation of classified jobs into view-ready summaries.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

use crate::domain::{Account, AccountId, AccountSummary, Job, JobStatus};

use super::cron_occurrence::{
    current_month_abbrev, month_name, next_occurrence_label, BILLING_TIMEZONE,
};

/// Group jobs by owning account, preserving each group's input order.
/// `BTreeMap` keeps the account iteration order deterministic.
pub fn group_by_account(jobs: &[Job]) -> BTreeMap<AccountId, Vec<Job>> {
    let mut grouped: BTreeMap<AccountId, Vec<Job>> = BTreeMap::new();
    for job in jobs {
        grouped.entry(job.account_id).or_default().push(job.clone());
    }
    grouped
}

/// Build one summary per account group. Given identical inputs and `now`
/// the output is byte-identical.
pub fn summarize(
    grouped: &BTreeMap<AccountId, Vec<Job>>,
    accounts: &[Account],
    now: DateTime<Utc>,
) -> Vec<AccountSummary> {
    let month_abbrev = current_month_abbrev(now);

    grouped
        .iter()
        .filter_map(|(&account_id, jobs)| {
            let last_job = jobs.last()?;

            let total_amount: Decimal = jobs.iter().map(|j| j.amount).sum();
            let completed_amount: Decimal = jobs
                .iter()
                .filter(|j| j.status == JobStatus::Completed)
                .map(|j| j.amount)
                .sum();
            let outstanding_amount = total_amount - completed_amount;
            let all_completed = jobs.iter().all(|j| j.status == JobStatus::Completed);

            // The group is active this period when its most recently
            // created job still resolves into the present month.
            let is_current_period = jobs
                .iter()
                .max_by_key(|j| j.created_at)
                .and_then(|j| next_occurrence_label(&j.cron_expression, j.created_at, now))
                .map(|label| label.contains(month_abbrev))
                .unwrap_or(false);

            let account = accounts.iter().find(|a| a.id == account_id);
            let tax_id = account.map(|a| a.tax_id.as_str()).unwrap_or("?");

            Some(AccountSummary {
                account_id,
                title_label: title_label(last_job, is_current_period, tax_id),
                is_current_period,
                job_count: jobs.len(),
                total_amount,
                completed_amount,
                outstanding_amount,
                all_completed,
            })
        })
        .collect()
}

/// `"Fact. <MesLargo> (Cuit: <tax_id>)"`, with a `Hasta` qualifier when the
/// summary spans prior periods.
fn title_label(last_job: &Job, is_current_period: bool, tax_id: &str) -> String {
    let month = capitalize(month_name(
        last_job
            .created_at
            .with_timezone(&BILLING_TIMEZONE)
            .month(),
    ));
    if is_current_period {
        format!("Fact. {} (Cuit: {})", month, tax_id)
    } else {
        format!("Fact. Hasta {} (Cuit: {})", month, tax_id)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
