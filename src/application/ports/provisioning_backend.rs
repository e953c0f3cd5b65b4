use async_trait::async_trait;

use crate::domain::NewAccount;

use super::BackendError;

/// Opaque reference to a generated credential (CSR) held by the backend.
#[derive(Debug, Clone)]
pub struct CredentialRef(pub String);

/// Handle to a long-running registration job on the scraper backend.
#[derive(Debug, Clone)]
pub struct RegistrationJob {
    pub job_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    Pending,
    Success,
    Error(String),
}

/// Backend driving the multi-step AFIP account provisioning workflow.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    async fn generate_credential(&self, account: &NewAccount)
        -> Result<CredentialRef, BackendError>;

    async fn submit_registration(
        &self,
        account: &NewAccount,
    ) -> Result<RegistrationJob, BackendError>;

    async fn poll_status(&self, job_id: &str) -> Result<PollStatus, BackendError>;

    /// Whether the secret store holds a usable credential for this CUIT.
    async fn check_security_layer(&self, tax_id: &str) -> Result<bool, BackendError>;

    /// One-shot recovery action for a CAPTCHA-blocked scraper.
    async fn trigger_recovery_redeploy(&self) -> Result<(), BackendError>;
}
