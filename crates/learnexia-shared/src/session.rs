use crate::{
    token::AuthToken,
    uac::{GuardError, Role, User},
};

/// Everything the client persists about the logged in user
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<AuthToken>,
    pub cached_user: Option<User>,
}

impl Session {
    pub fn new(token: AuthToken, user: User) -> Self {
        Self {
            token: Some(token),
            cached_user: Some(user),
        }
    }

    /// Returns the cached user if this session may open a page that requires
    /// `required`
    ///
    /// Checks run in the order token, user, role. An empty token counts as
    /// missing.
    pub fn authenticated_user(&self, required: Role) -> Result<&User, GuardError> {
        if self.token.as_ref().is_none_or(AuthToken::is_empty) {
            return Err(GuardError::TokenMissing);
        }
        let Some(user) = self.cached_user.as_ref() else {
            return Err(GuardError::UserMissing);
        };
        if !user.role.satisfies(required) {
            return Err(GuardError::RoleMismatch {
                required,
                actual: user.role,
            });
        }
        Ok(user)
    }
}
