//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

use std::time::Duration;

pub const PANIC_ON_RARE_ERR: bool = true;

pub mod client {
    /// Used when no configuration provides a server address
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:5000";
    /// Where the guard sends the user when the session is not valid
    pub const CLIENT_LOGIN_ROUTE: &str = "/login";
    pub const CLIENT_STORAGE_KEY_TOKEN: &str = "user_token";
    pub const CLIENT_STORAGE_KEY_USER: &str = "user";
}

pub mod password {
    use super::*;

    pub const PASSWORD_MIN_LENGTH: usize = 6;
    /// How long the success message stays up before the dialog closes itself
    pub const PASSWORD_SUCCESS_AUTO_CLOSE: Duration = Duration::from_millis(2000);
}

pub mod messages {
    pub const MSG_LOAD_PROFILE_FAILED: &str = "Failed to load profile";
    pub const MSG_SAVE_PROFILE_FAILED: &str = "Failed to save profile";
    pub const MSG_CHANGE_PASSWORD_FAILED: &str = "Failed to change password";
    pub const MSG_PASSWORD_CHANGED: &str = "Password changed successfully!";
    pub const MSG_NAME_NOT_SET: &str = "Not set";
    pub const MSG_NAME_FALLBACK: &str = "Student";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_API_CHANGE_PASSWORD: PathSpec = PathSpec::post("/api/auth/change-password");
    pub const PATH_API_MY_COURSES: PathSpec = PathSpec::get("/api/courses/my");
    pub const PATH_API_PROFILE_SUMMARY: PathSpec = PathSpec::get("/api/users/me/summary");
    pub const PATH_API_UPDATE_ME: PathSpec = PathSpec::put("/api/users/me");
    pub const PATH_API_WALLET_BALANCE: PathSpec = PathSpec::get("/api/wallet/balance");
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/auth/login");
}
