use async_trait::async_trait;

use crate::domain::{Account, AccountId, AccountUpdate, NewAccount};

use super::BackendError;

/// Remote taxpayer-account backend (CRUD plus AFIP connectivity check).
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Account>, BackendError>;

    async fn create(&self, payload: &NewAccount) -> Result<Account, BackendError>;

    async fn update(&self, id: AccountId, payload: &AccountUpdate)
        -> Result<Account, BackendError>;

    async fn delete(&self, id: AccountId) -> Result<(), BackendError>;

    /// Whether the downstream e-invoicing SDK can reach AFIP for this CUIT.
    async fn check_connectivity(&self, tax_id: &str) -> Result<bool, BackendError>;
}
