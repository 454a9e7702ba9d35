//! Shared items related to user account control

mod errors;
mod responses;
mod role;
mod user;

pub use errors::{ChangePasswordError, GuardError};
pub use responses::LoginResponse;
pub use role::Role;
pub use user::{validate_new_password, DisplayName, Email, User, UserId};
