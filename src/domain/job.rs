use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, JobStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(i64);

impl JobId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scheduled invoice-generation unit, immutable once created.
///
/// `cron_expression` describes when the backend (re)generates this job's
/// invoice; this core only reasons about it for classification. An
/// unparsable expression makes classification indeterminate for the job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(rename = "userId")]
    pub account_id: AccountId,
    #[serde(rename = "salePoint")]
    pub sale_number: i64,
    pub status: JobStatus,
    #[serde(rename = "valueToBill", with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "cronExpression")]
    pub cron_expression: String,
}
