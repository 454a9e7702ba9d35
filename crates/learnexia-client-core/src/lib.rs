//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
mod profile_api;
mod session_store;

pub use client::{Client, UiCallBack, NO_ARGS};
pub use profile_api::{ProfileApi, ResponseReceiver};
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};
