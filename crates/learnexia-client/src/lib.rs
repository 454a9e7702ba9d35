//! Session guard, navigation shell and profile page state machines for the
//! Learnexia client, plus the command line front end that drives them
//!
//! The state machines are not tied to any UI framework. They start requests
//! through [`learnexia_client_core::ProfileApi`] and either get polled from an
//! event loop or awaited.

#![warn(unused_crate_dependencies)]


pub mod format;
pub mod guard;
pub mod navigation;
pub mod pages;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod configuration;
#[cfg(not(target_arch = "wasm32"))]
pub mod runtime;
#[cfg(not(target_arch = "wasm32"))]
pub mod tracing;

#[cfg(test)]
mod test_helpers;

pub use guard::{ensure_session, ProtectedPage};
pub use navigation::{NavItem, Navigator, Route, Shell};
pub use pages::{
    change_password::UiChangePassword,
    profile::{EditError, PageState, ProfileData, ProfileEditState, ProfilePage},
};
