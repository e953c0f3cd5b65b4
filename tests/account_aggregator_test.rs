use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use facturador::application::services::{group_by_account, summarize};
use facturador::domain::{Account, AccountId, Job, JobId, JobStatus};

const CURRENT_MONTH_CRON: &str = "0 0 28 * *";
const PAST_PERIOD_CRON: &str = "0 0 1 * *";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn job(id: i64, account: i64, status: JobStatus, amount: &str, created: DateTime<Utc>, cron: &str) -> Job {
    Job {
        id: JobId::new(id),
        account_id: AccountId::new(account),
        sale_number: 3,
        status,
        amount: amount.parse().unwrap(),
        created_at: created,
        cron_expression: cron.to_string(),
    }
}

fn account(id: i64, tax_id: &str) -> Account {
    Account {
        id: AccountId::new(id),
        display_name: format!("Account {}", id),
        tax_id: tax_id.to_string(),
        credential_secret: "secret".to_string(),
    }
}

fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
}

#[test]
fn given_jobs_for_several_accounts_when_grouping_then_groups_preserve_input_order() {
    let jobs = vec![
        job(1, 9, JobStatus::Pending, "10", march(1), CURRENT_MONTH_CRON),
        job(2, 4, JobStatus::Pending, "10", march(1), CURRENT_MONTH_CRON),
        job(3, 9, JobStatus::Failed, "10", march(2), CURRENT_MONTH_CRON),
    ];

    let grouped = group_by_account(&jobs);

    let keys: Vec<i64> = grouped.keys().map(|k| k.value()).collect();
    assert_eq!(keys, vec![4, 9]);
    let ids: Vec<i64> = grouped[&AccountId::new(9)].iter().map(|j| j.id.value()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn given_mixed_statuses_when_summarizing_then_amounts_split_exactly() {
    let jobs = vec![
        job(1, 7, JobStatus::Completed, "100.10", march(1), CURRENT_MONTH_CRON),
        job(2, 7, JobStatus::Pending, "200.25", march(2), CURRENT_MONTH_CRON),
        job(3, 7, JobStatus::Failed, "0.65", march(3), CURRENT_MONTH_CRON),
    ];
    let accounts = vec![account(7, "20-11111111-3")];

    let summaries = summarize(&group_by_account(&jobs), &accounts, now());

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.job_count, 3);
    assert_eq!(summary.total_amount, "301.00".parse::<Decimal>().unwrap());
    assert_eq!(summary.completed_amount, "100.10".parse::<Decimal>().unwrap());
    assert_eq!(summary.outstanding_amount, "200.90".parse::<Decimal>().unwrap());
    assert_eq!(
        summary.completed_amount + summary.outstanding_amount,
        summary.total_amount
    );
    assert!(!summary.all_completed);
}

#[test]
fn given_all_jobs_completed_when_summarizing_then_all_completed_is_set() {
    let jobs = vec![
        job(1, 7, JobStatus::Completed, "50", march(1), CURRENT_MONTH_CRON),
        job(2, 7, JobStatus::Completed, "50", march(2), CURRENT_MONTH_CRON),
    ];
    let accounts = vec![account(7, "20-11111111-3")];

    let summaries = summarize(&group_by_account(&jobs), &accounts, now());

    assert!(summaries[0].all_completed);
    assert_eq!(summaries[0].outstanding_amount, Decimal::ZERO);
}

#[test]
fn given_latest_job_in_current_month_when_summarizing_then_account_is_active_with_plain_title() {
    let jobs = vec![job(
        1,
        7,
        JobStatus::Pending,
        "50",
        march(5),
        CURRENT_MONTH_CRON,
    )];
    let accounts = vec![account(7, "20-11111111-3")];

    let summaries = summarize(&group_by_account(&jobs), &accounts, now());

    assert!(summaries[0].is_current_period);
    assert_eq!(summaries[0].title_label, "Fact. Marzo (Cuit: 20-11111111-3)");
}

#[test]
fn given_latest_job_outside_current_month_when_summarizing_then_title_carries_hasta_qualifier() {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let jobs = vec![job(1, 7, JobStatus::Completed, "50", created, PAST_PERIOD_CRON)];
    let accounts = vec![account(7, "20-11111111-3")];

    let summaries = summarize(&group_by_account(&jobs), &accounts, now());

    assert!(!summaries[0].is_current_period);
    assert_eq!(
        summaries[0].title_label,
        "Fact. Hasta Enero (Cuit: 20-11111111-3)"
    );
}

#[test]
fn given_unknown_account_when_summarizing_then_tax_id_falls_back_to_placeholder() {
    let jobs = vec![job(1, 99, JobStatus::Pending, "50", march(5), CURRENT_MONTH_CRON)];

    let summaries = summarize(&group_by_account(&jobs), &[], now());

    assert_eq!(summaries[0].title_label, "Fact. Marzo (Cuit: ?)");
}

#[test]
fn given_identical_inputs_when_summarizing_twice_then_output_is_byte_identical() {
    let jobs = vec![
        job(1, 7, JobStatus::Completed, "100.10", march(1), CURRENT_MONTH_CRON),
        job(2, 4, JobStatus::Pending, "200.25", march(2), PAST_PERIOD_CRON),
    ];
    let accounts = vec![account(7, "20-11111111-3"), account(4, "27-22222222-9")];
    let grouped = group_by_account(&jobs);

    let first = serde_json::to_string(&summarize(&grouped, &accounts, now())).unwrap();
    let second = serde_json::to_string(&summarize(&grouped, &accounts, now())).unwrap();

    assert_eq!(first, second);
}
