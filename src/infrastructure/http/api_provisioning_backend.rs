use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{
    BackendError, CredentialRef, PollStatus, ProvisioningBackend, RegistrationJob,
    SessionProvider,
};
use crate::domain::NewAccount;

use super::api_job_backend::unexpected_status;

/// Provisioning talks to two collaborators: the main API (credentials and
/// vault checks) and the scraper service driving the AFIP registration.
pub struct ApiProvisioningBackend {
    client: reqwest::Client,
    base_url: String,
    scraper_url: String,
    redeploy_url: String,
    session: Arc<dyn SessionProvider>,
}

#[derive(Deserialize)]
struct CredentialResponse {
    id: String,
}

#[derive(Deserialize)]
struct RegistrationResponse {
    #[serde(rename = "jobId")]
    job_id: String,
}

#[derive(Deserialize)]
struct PollResponse {
    status: String,
    error: Option<String>,
}

#[derive(Deserialize)]
struct OkResponse {
    ok: bool,
}

impl ApiProvisioningBackend {
    pub fn new(
        base_url: &str,
        scraper_url: &str,
        redeploy_url: &str,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            scraper_url: scraper_url.trim_end_matches('/').to_string(),
            redeploy_url: redeploy_url.to_string(),
            session,
        }
    }

    fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, BackendError> {
        let token = self
            .session
            .session_token()
            .ok_or(BackendError::MissingSession)?;
        Ok(builder.bearer_auth(token))
    }
}

#[async_trait]
impl ProvisioningBackend for ApiProvisioningBackend {
    async fn generate_credential(
        &self,
        account: &NewAccount,
    ) -> Result<CredentialRef, BackendError> {
        let response = self
            .authorize(self.client.post(format!("{}/api/csr", self.base_url)))?
            .json(account)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: CredentialResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(CredentialRef(body.id))
    }

    async fn submit_registration(
        &self,
        account: &NewAccount,
    ) -> Result<RegistrationJob, BackendError> {
        let response = self
            .authorize(
                self.client
                    .post(format!("{}/api/scrapper", self.scraper_url)),
            )?
            .json(&serde_json::json!({ "username": account.tax_id }))
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: RegistrationResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(RegistrationJob {
            job_id: body.job_id,
        })
    }

    async fn poll_status(&self, job_id: &str) -> Result<PollStatus, BackendError> {
        let response = self
            .authorize(self.client.get(format!(
                "{}/api/scrapper/status/{}",
                self.scraper_url, job_id
            )))?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: PollResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        match body.status.as_str() {
            "pending" => Ok(PollStatus::Pending),
            "success" => Ok(PollStatus::Success),
            "error" => Ok(PollStatus::Error(body.error.unwrap_or_default())),
            other => Err(BackendError::InvalidResponse(format!(
                "unknown poll status: {}",
                other
            ))),
        }
    }

    async fn check_security_layer(&self, tax_id: &str) -> Result<bool, BackendError> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/api/vault/status/{}", self.base_url, tax_id)),
            )?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: OkResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(body.ok)
    }

    async fn trigger_recovery_redeploy(&self) -> Result<(), BackendError> {
        let response = self
            .authorize(self.client.post(&self.redeploy_url))?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        tracing::info!("Recovery redeploy triggered");
        Ok(())
    }
}
