//! Backend error taxonomy
//!
//! The bridge exposes a small, closed set of failure kinds. Availability
//! tracking depends on telling the token errors apart; everything else is
//! either a caller mistake or a transient fault the caller may retry.

use thiserror::Error;

/// Errors the backend bridge can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GhdError {
    /// No API token has been configured yet
    #[error("token not found")]
    TokenNotFound,

    /// A token exists but the backend rejected it as malformed or revoked
    #[error("bad token")]
    BadToken,

    /// The requested login is not tracked / does not exist
    #[error("user not found")]
    UserNotFound,

    /// The request itself was malformed
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Transient or unclassified backend failure
    #[error("unknown error: {0}")]
    Unknown(String),
}

/// Convenience alias for bridge results.
pub type Result<T> = std::result::Result<T, GhdError>;
