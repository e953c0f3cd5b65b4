mod api_account_backend;
mod api_job_backend;
mod api_provisioning_backend;
mod static_session_provider;

pub use api_account_backend::ApiAccountBackend;
pub use api_job_backend::ApiJobBackend;
pub use api_provisioning_backend::ApiProvisioningBackend;
pub use static_session_provider::StaticSessionProvider;
