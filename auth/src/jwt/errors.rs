use thiserror::Error;

/// Error type for token operations.
///
/// Expiry and signature failures are distinguished here so callers can log
/// the real cause; the HTTP boundary collapses both into one generic
/// unauthenticated response.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
