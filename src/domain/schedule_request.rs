use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::AccountId;

/// Validated job-creation request, sent to the backend once and discarded.
///
/// Dates go over the wire as `YYYY-M-D` without zero padding; the backend
/// expects exactly that shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRequest {
    #[serde(rename = "userId")]
    pub account_id: AccountId,
    #[serde(rename = "minBill")]
    pub min_amount: Decimal,
    #[serde(rename = "maxBill")]
    pub max_amount: Decimal,
    #[serde(rename = "billNumber")]
    pub invoice_count: u32,
    #[serde(rename = "startDate", serialize_with = "compact_date::serialize")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate", serialize_with = "compact_date::serialize")]
    pub end_date: NaiveDate,
}

pub mod compact_date {
    use chrono::Datelike;
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn format(date: &NaiveDate) -> String {
        format!("{}-{}-{}", date.year(), date.month(), date.day())
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(date))
    }
}
