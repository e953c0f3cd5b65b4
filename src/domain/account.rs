use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A taxpayer entity on whose behalf invoices are generated.
///
/// Referenced by jobs through `AccountId` only; the job backend owns the
/// jobs' lifecycle. `tax_id` is the CUIT-like natural key the fiscal
/// authority knows the account by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(rename = "real_name")]
    pub display_name: String,
    #[serde(rename = "username")]
    pub tax_id: String,
    #[serde(rename = "password")]
    pub credential_secret: String,
}

/// Payload for registering a new taxpayer account.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    #[serde(rename = "real_name")]
    pub display_name: String,
    #[serde(rename = "username")]
    pub tax_id: String,
    #[serde(rename = "password")]
    pub credential_secret: String,
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(rename = "real_name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "username", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(rename = "password", skip_serializing_if = "Option::is_none")]
    pub credential_secret: Option<String>,
}
