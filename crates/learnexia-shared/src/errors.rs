use thiserror::Error;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
}

/// Returned when the server rejects the session token (usually because it
/// expired or was revoked in another tab)
#[derive(Debug, Error)]
#[error("The user has not logged in")]
pub struct NotLoggedInError;
