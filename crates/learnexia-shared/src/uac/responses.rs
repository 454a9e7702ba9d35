use crate::token::AuthToken;

use super::User;

/// Body returned by the server on a successful login
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    pub token: AuthToken,
    pub user: User,
}
