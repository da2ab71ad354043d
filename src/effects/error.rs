//! Auth service error types.

use thiserror::Error;

/// Failures reported by an [`super::AuthService`].
///
/// The session core never sees these: a failed profile fetch reaches it
/// only as `RequestProfileFailed`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AuthError {
    /// The service rejected the current credentials
    #[error("Not authorized")]
    Unauthorized,

    /// The request did not reach the service or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with something that is not a profile
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
