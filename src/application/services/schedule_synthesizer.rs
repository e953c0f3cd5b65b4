//! Validation of user-supplied scheduling input into a backend-ready
//! `ScheduleRequest`, plus the suggested-invoice-count heuristic.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{AccountId, ScheduleRequest};

/// Lower and upper factors of the suggested-count draw: uniform over
/// `[max_amount * 0.000011, max_amount * 0.0000125)`. The factors come from
/// the accounting side and must not be tuned here.
const SUGGESTED_COUNT_MIN_FACTOR: f64 = 0.000011;
const SUGGESTED_COUNT_MAX_FACTOR: f64 = 0.0000125;

/// Raw form input for a new invoicing schedule. The hour window bounds the
/// backend's intra-day randomization and is not part of the wire request.
#[derive(Debug, Clone)]
pub struct ScheduleInput {
    pub account_id: i64,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub invoice_count: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
    pub min_hour: u8,
    pub max_hour: u8,
}

impl ScheduleInput {
    pub const DEFAULT_MIN_HOUR: u8 = 9;
    pub const DEFAULT_MAX_HOUR: u8 = 21;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("account id is required and must be positive")]
    InvalidAccount,
    #[error("minimum amount must be greater than 0")]
    NonPositiveMinAmount,
    #[error("maximum amount must be greater than 0")]
    NonPositiveMaxAmount,
    #[error("minimum amount cannot exceed maximum amount")]
    AmountRangeInverted,
    #[error("invoice count must be greater than 0")]
    NonPositiveInvoiceCount,
    #[error("start date must be strictly before end date")]
    DateRangeInverted,
    #[error("hour window must satisfy 0 <= min < max <= 23")]
    InvalidHourWindow,
}

/// Validate `input` and produce the one-shot creation request. `today` is
/// injected; a missing start date defaults to tomorrow.
pub fn build_schedule_request(
    input: &ScheduleInput,
    today: NaiveDate,
) -> Result<ScheduleRequest, ValidationError> {
    if input.account_id <= 0 {
        return Err(ValidationError::InvalidAccount);
    }
    if input.min_amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveMinAmount);
    }
    if input.max_amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveMaxAmount);
    }
    if input.min_amount > input.max_amount {
        return Err(ValidationError::AmountRangeInverted);
    }
    if input.invoice_count == 0 {
        return Err(ValidationError::NonPositiveInvoiceCount);
    }
    if input.min_hour >= input.max_hour || input.max_hour > 23 {
        return Err(ValidationError::InvalidHourWindow);
    }

    let start_date = match input.start_date {
        Some(date) => date,
        None => today
            .checked_add_days(Days::new(1))
            .ok_or(ValidationError::DateRangeInverted)?,
    };
    if start_date >= input.end_date {
        return Err(ValidationError::DateRangeInverted);
    }

    Ok(ScheduleRequest {
        account_id: AccountId::new(input.account_id),
        min_amount: input.min_amount,
        max_amount: input.max_amount,
        invoice_count: input.invoice_count,
        start_date,
        end_date: input.end_date,
    })
}

/// Suggest a plausible invoice count for `max_amount`. A convenience for
/// the "shuffle" button only; any positive count the caller supplies is
/// accepted by `build_schedule_request`.
pub fn suggested_invoice_count<R: Rng>(max_amount: Decimal, rng: &mut R) -> u32 {
    let max = max_amount.to_f64().unwrap_or(0.0);
    let lo = max * SUGGESTED_COUNT_MIN_FACTOR;
    let hi = max * SUGGESTED_COUNT_MAX_FACTOR;
    if !(hi > lo) {
        return 1;
    }
    rng.gen_range(lo..hi) as u32 + 1
}
