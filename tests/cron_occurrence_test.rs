use chrono::{NaiveDate, TimeZone, Utc};

use facturador::application::services::cron_occurrence::{
    current_month_abbrev, format_label, months_between, next_occurrence_label,
};

#[test]
fn given_monthly_cron_created_in_january_when_now_is_march_then_label_anchors_to_january() {
    // Next fire after mid-March is April 1st; the anchor shifts it back by
    // the three whole months elapsed since creation.
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    let label = next_occurrence_label("0 0 1 * *", created, now);

    assert_eq!(label.as_deref(), Some("2024 ene 01"));
}

#[test]
fn given_cron_created_this_month_when_next_fire_is_this_month_then_label_contains_current_month() {
    let created = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    let label = next_occurrence_label("0 0 28 * *", created, now).unwrap();

    assert!(label.contains(current_month_abbrev(now)));
    assert_eq!(label, "2024 mar 28");
}

#[test]
fn given_six_field_expression_when_resolving_then_it_is_accepted_as_is() {
    let created = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    assert_eq!(
        next_occurrence_label("0 0 0 28 * *", created, now).as_deref(),
        Some("2024 mar 28")
    );
}

#[test]
fn given_malformed_expression_when_resolving_then_returns_none() {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

    assert_eq!(next_occurrence_label("not a cron", created, now), None);
    assert_eq!(next_occurrence_label("", created, now), None);
    assert_eq!(next_occurrence_label("99 99 99 * *", created, now), None);
}

#[test]
fn given_shift_landing_on_short_month_when_resolving_then_day_is_clamped() {
    // Fires March 31st; one month back from that is February, which tops
    // out at the 29th in 2024.
    let created = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap();

    let label = next_occurrence_label("0 0 31 3 *", created, now);

    assert_eq!(label.as_deref(), Some("2024 feb 29"));
}

#[test]
fn given_dates_when_computing_months_between_then_result_is_sign_sensitive() {
    let january = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let april = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
    let next_february = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    assert_eq!(months_between(january, april), 3);
    assert_eq!(months_between(april, january), -3);
    assert_eq!(months_between(january, next_february), 13);
    assert_eq!(months_between(january, january), 0);
}

#[test]
fn given_a_date_when_formatting_then_label_is_year_abbrev_and_padded_day() {
    let date = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
    assert_eq!(format_label(date), "2024 dic 03");
}

#[test]
fn given_now_when_reading_current_month_abbrev_then_it_uses_the_billing_timezone() {
    // 01:00 UTC on April 1st is still March 31st in Buenos Aires (UTC-3).
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 1, 0, 0).unwrap();
    assert_eq!(current_month_abbrev(now), "mar");

    let later = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
    assert_eq!(current_month_abbrev(later), "abr");
}
