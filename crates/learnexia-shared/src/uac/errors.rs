use super::Role;

/// Reasons the session guard refuses to show a protected page
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GuardError {
    #[error("No session token stored")]
    TokenMissing,
    #[error("No cached user stored")]
    UserMissing,
    #[error("Page requires role '{required}' but the session has role '{actual}'")]
    RoleMismatch { required: Role, actual: Role },
}

/// Client side validation failures for a password change
///
/// The server may reject a change for other reasons (for example a wrong
/// current password), those arrive as the server's message instead
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ChangePasswordError {
    #[error("New passwords do not match")]
    PasswordsDoNotMatch,
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize, actual: usize },
    #[error("A password change is already in progress")]
    Busy,
    #[error("The change password dialog is not open")]
    NotOpen,
}
