mod account_backend;
mod backend_error;
mod job_backend;
mod provisioning_backend;
mod session_provider;

pub use account_backend::AccountBackend;
pub use backend_error::BackendError;
pub use job_backend::{JobBackend, PauseOutcome, RetryOutcome};
pub use provisioning_backend::{
    CredentialRef, PollStatus, ProvisioningBackend, RegistrationJob,
};
pub use session_provider::SessionProvider;
