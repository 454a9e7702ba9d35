pub mod change_password;
pub mod data_state;
pub mod profile;
