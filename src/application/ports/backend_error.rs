#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
    #[error("no session token available")]
    MissingSession,
}
