use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{
    BackendError, JobBackend, PauseOutcome, RetryOutcome, SessionProvider,
};
use crate::domain::{AccountId, Job, JobId, ScheduleRequest};

pub struct ApiJobBackend {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

impl ApiJobBackend {
    pub fn new(base_url: &str, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
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
impl JobBackend for ApiJobBackend {
    async fn list(&self, account: Option<AccountId>) -> Result<Vec<Job>, BackendError> {
        let mut request = self
            .authorize(self.client.get(format!("{}/api/jobs", self.base_url)))?;
        if let Some(account) = account {
            request = request.query(&[("userId", account.value())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn create(&self, request: &ScheduleRequest) -> Result<Job, BackendError> {
        let response = self
            .authorize(self.client.post(format!("{}/api/bill", self.base_url)))?
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    async fn retry(&self, job_id: JobId) -> Result<RetryOutcome, BackendError> {
        let response = self
            .authorize(
                self.client
                    .post(format!("{}/api/jobs/{}/retry", self.base_url, job_id)),
            )?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        // Any HTTP status is a legitimate retry outcome; only transport
        // failures are backend errors.
        let http_status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Ok(RetryOutcome {
            http_status,
            message,
        })
    }

    async fn pause_many(&self, job_ids: &[JobId]) -> Result<PauseOutcome, BackendError> {
        let response = self
            .authorize(
                self.client
                    .post(format!("{}/api/jobs/pause", self.base_url)),
            )?
            .json(&serde_json::json!({ "jobIds": job_ids }))
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
        Ok(PauseOutcome {
            message: body.message,
        })
    }

    async fn delete_all_for_account(&self, account_id: AccountId) -> Result<(), BackendError> {
        let response = self
            .authorize(
                self.client
                    .delete(format!("{}/api/jobs/user/{}", self.base_url, account_id)),
            )?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        Ok(())
    }
}

pub(super) async fn unexpected_status(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    BackendError::UnexpectedStatus { status, message }
}
