use crate::application::ports::SessionProvider;

/// Session provider backed by a token handed over at startup (or the
/// `SESSION_TOKEN` environment variable). The token stays opaque.
pub struct StaticSessionProvider {
    token: Option<String>,
}

impl StaticSessionProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn from_env() -> Self {
        Self {
            token: std::env::var("SESSION_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

impl SessionProvider for StaticSessionProvider {
    fn session_token(&self) -> Option<String> {
        self.token.clone()
    }
}
