//! Client for the hosted completion service.
//!
//! Speaks the chat-completions wire format: an ordered list of role-tagged
//! turns goes out, a single generated reply comes back.

pub mod client;
pub mod error;
pub mod types;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use types::{Turn, TurnRole};
