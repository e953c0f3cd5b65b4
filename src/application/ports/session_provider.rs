/// Source of the opaque session token attached to backend requests.
///
/// The token is never interpreted here; authentication itself is an
/// external collaborator.
pub trait SessionProvider: Send + Sync {
    fn session_token(&self) -> Option<String>;
}
