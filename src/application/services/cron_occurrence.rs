//! Cron occurrence resolution for period classification.
//!
//! Recurring jobs are created once with a cron rule. For display and
//! grouping we need the occurrence relative to the job's original billing
//! cycle, not the literal next fire: the next fire instant is shifted
//! backward by the whole months elapsed between creation and that fire.
//!
//! Accepts standard 5-field Unix cron expressions (minute, hour,
//! day-of-month, month, day-of-week); the `cron` crate wants 6 fields, so
//! a seconds field is prepended.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use cron::Schedule;

/// All period reasoning happens in the fiscal authority's timezone.
pub const BILLING_TIMEZONE: Tz = chrono_tz::America::Argentina::Buenos_Aires;

const MONTH_ABBREVS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Label of the occurrence anchored to the job's creation cycle, formatted
/// as `"<year> <abbrev-month> <2-digit-day>"` (es-AR month abbreviation).
///
/// Returns `None` when the expression is unparsable or has no upcoming
/// fire; callers must treat that as "cannot classify".
pub fn next_occurrence_label(
    cron_expression: &str,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<String> {
    let schedule = match Schedule::from_str(&normalize_cron_expr(cron_expression)) {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::debug!(cron = cron_expression, error = %e, "Unparsable cron expression");
            return None;
        }
    };

    let next = schedule
        .after(&now.with_timezone(&BILLING_TIMEZONE))
        .next()?
        .date_naive();
    let created = created_at.with_timezone(&BILLING_TIMEZONE).date_naive();

    let anchored = shift_months(next, -months_between(created, next));
    Some(format_label(anchored))
}

/// Signed whole-month distance: `(y2-y1)*12 + (m2-m1)`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Abbreviated month of "now" in the billing timezone, the needle used by
/// the classifier and the aggregator.
pub fn current_month_abbrev(now: DateTime<Utc>) -> &'static str {
    month_abbrev(now.with_timezone(&BILLING_TIMEZONE).month())
}

pub fn month_abbrev(month: u32) -> &'static str {
    MONTH_ABBREVS[(month as usize - 1) % 12]
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month as usize - 1) % 12]
}

pub fn format_label(date: NaiveDate) -> String {
    format!(
        "{} {} {:02}",
        date.year(),
        month_abbrev(date.month()),
        date.day()
    )
}

/// Prepend a seconds field to 5-field Unix expressions; 6+ fields pass
/// through untouched.
fn normalize_cron_expr(expr: &str) -> String {
    if expr.split_whitespace().count() == 5 {
        format!("0 {}", expr)
    } else {
        expr.to_string()
    }
}

/// Move a date by whole months, clamping the day to the target month's
/// length (Jan 31 minus one month stays a valid date).
fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month0() as i32 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}
