use secrecy::{ExposeSecret as _, SecretString};

use crate::uac::{validate_new_password, ChangePasswordError, DisplayName};

#[derive(serde::Deserialize)]
pub struct ChangePasswordReqArgs {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub new_password_check: SecretString,
}

impl ChangePasswordReqArgs {
    /// Applies the rules that must pass before the request is sent
    pub fn validate(&self) -> Result<(), ChangePasswordError> {
        validate_new_password(
            self.new_password.expose_secret(),
            self.new_password_check.expose_secret(),
        )
    }
}

impl std::fmt::Debug for ChangePasswordReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordReqArgs")
            .field(
                "has_current_password",
                &!self.current_password.expose_secret().is_empty(),
            )
            .field("new_password_valid", &self.validate().is_ok())
            .finish()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct UpdateMeReqArgs {
    pub name: DisplayName,
}
