//! Multi-step AFIP account provisioning.
//!
//! create account -> generate credential -> submit registration ->
//! poll registration -> verify security layer -> verify connectivity.
//!
//! Every step is terminal on failure. The only automatic recovery action
//! in the whole core lives here: when polling reports a CAPTCHA block, the
//! workflow triggers exactly one scraper redeploy and surfaces a distinct
//! "blocked, retry later" error instead of the generic failure.
//!
//! The returned future suspends only inside `tokio::time::sleep`, so
//! dropping it (dialog closed) cancels the poll loop without leaking a
//! timer.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AccountBackend, BackendError, PollStatus, ProvisioningBackend,
};
use crate::domain::{Account, NewAccount};

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub max_polls: u32,
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_polls: 20,
            delay: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("all fields are required")]
    MissingFields,
    #[error("account creation failed: {0}")]
    AccountCreation(BackendError),
    #[error("credential generation failed: {0}")]
    CredentialGeneration(BackendError),
    #[error("registration submission failed: {0}")]
    Registration(BackendError),
    #[error("registration failed: {0}")]
    RegistrationFailed(String),
    #[error("the scraper is blocked by a captcha; a redeploy was triggered, try again in a few minutes")]
    CaptchaBlocked,
    #[error("timed out waiting for the registration to finish")]
    Timeout,
    #[error("the security layer holds no usable credential for this account")]
    SecurityLayerUnavailable,
    #[error("the downstream e-invoicing service cannot reach AFIP for this account")]
    ConnectivityCheckFailed,
    #[error("backend: {0}")]
    Backend(#[from] BackendError),
}

pub struct ProvisioningWorkflow {
    account_backend: Arc<dyn AccountBackend>,
    provisioning_backend: Arc<dyn ProvisioningBackend>,
    poll: PollConfig,
}

impl ProvisioningWorkflow {
    pub fn new(
        account_backend: Arc<dyn AccountBackend>,
        provisioning_backend: Arc<dyn ProvisioningBackend>,
        poll: PollConfig,
    ) -> Self {
        Self {
            account_backend,
            provisioning_backend,
            poll,
        }
    }

    pub async fn run(&self, request: &NewAccount) -> Result<Account, ProvisioningError> {
        if request.display_name.trim().is_empty()
            || request.tax_id.trim().is_empty()
            || request.credential_secret.trim().is_empty()
        {
            return Err(ProvisioningError::MissingFields);
        }

        tracing::info!(tax_id = %request.tax_id, "Provisioning account");
        let account = self
            .account_backend
            .create(request)
            .await
            .map_err(ProvisioningError::AccountCreation)?;

        tracing::info!(account_id = %account.id, "Generating credential");
        let credential = self
            .provisioning_backend
            .generate_credential(request)
            .await
            .map_err(ProvisioningError::CredentialGeneration)?;
        tracing::debug!(credential = %credential.0, "Credential generated");

        tracing::info!(account_id = %account.id, "Submitting registration");
        let registration = self
            .provisioning_backend
            .submit_registration(request)
            .await
            .map_err(ProvisioningError::Registration)?;

        self.poll_registration(&registration.job_id).await?;

        tracing::info!(account_id = %account.id, "Verifying security layer");
        if !self
            .provisioning_backend
            .check_security_layer(&request.tax_id)
            .await?
        {
            return Err(ProvisioningError::SecurityLayerUnavailable);
        }

        tracing::info!(account_id = %account.id, "Verifying downstream connectivity");
        if !self
            .account_backend
            .check_connectivity(&request.tax_id)
            .await?
        {
            return Err(ProvisioningError::ConnectivityCheckFailed);
        }

        tracing::info!(account_id = %account.id, "Account provisioned");
        Ok(account)
    }

    async fn poll_registration(&self, job_id: &str) -> Result<(), ProvisioningError> {
        for attempt in 0..self.poll.max_polls {
            match self.provisioning_backend.poll_status(job_id).await? {
                PollStatus::Success => {
                    tracing::info!(job_id, attempt, "Registration finished");
                    return Ok(());
                }
                PollStatus::Error(message) => {
                    if message.contains("captcha") {
                        tracing::warn!(job_id, "Registration blocked by captcha, redeploying");
                        self.provisioning_backend.trigger_recovery_redeploy().await?;
                        return Err(ProvisioningError::CaptchaBlocked);
                    }
                    return Err(ProvisioningError::RegistrationFailed(message));
                }
                PollStatus::Pending => {
                    tracing::debug!(job_id, attempt, "Registration still pending");
                    tokio::time::sleep(self.poll.delay).await;
                }
            }
        }
        Err(ProvisioningError::Timeout)
    }
}
