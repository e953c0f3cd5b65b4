use rust_decimal::Decimal;
use serde::Serialize;

use super::AccountId;

/// View-ready aggregate over one account's classified jobs.
///
/// Derived on every classification pass, never persisted. By construction
/// `completed_amount + outstanding_amount == total_amount` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub title_label: String,
    pub is_current_period: bool,
    pub job_count: usize,
    pub total_amount: Decimal,
    pub completed_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub all_completed: bool,
}
