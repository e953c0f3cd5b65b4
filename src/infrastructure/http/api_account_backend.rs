use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{AccountBackend, BackendError, SessionProvider};
use crate::domain::{Account, AccountId, AccountUpdate, NewAccount};

use super::api_job_backend::unexpected_status;

pub struct ApiAccountBackend {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

#[derive(Deserialize)]
struct OkResponse {
    ok: bool,
}

impl ApiAccountBackend {
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

    async fn expect_account(&self, response: reqwest::Response) -> Result<Account, BackendError> {
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AccountBackend for ApiAccountBackend {
    async fn list(&self) -> Result<Vec<Account>, BackendError> {
        let response = self
            .authorize(self.client.get(format!("{}/api/users", self.base_url)))?
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

    async fn create(&self, payload: &NewAccount) -> Result<Account, BackendError> {
        let response = self
            .authorize(self.client.post(format!("{}/api/users", self.base_url)))?
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        self.expect_account(response).await
    }

    async fn update(
        &self,
        id: AccountId,
        payload: &AccountUpdate,
    ) -> Result<Account, BackendError> {
        let response = self
            .authorize(
                self.client
                    .put(format!("{}/api/users/{}", self.base_url, id)),
            )?
            .json(payload)
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        self.expect_account(response).await
    }

    async fn delete(&self, id: AccountId) -> Result<(), BackendError> {
        let response = self
            .authorize(
                self.client
                    .delete(format!("{}/api/users/{}", self.base_url, id)),
            )?
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }
        Ok(())
    }

    async fn check_connectivity(&self, tax_id: &str) -> Result<bool, BackendError> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/api/afip/status/{}", self.base_url, tax_id)),
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
}
