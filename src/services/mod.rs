//! Service layer orchestrating repositories and the completion client.

pub mod chat;

pub use chat::{ChatService, DEFAULT_LIST_LIMIT, HISTORY_WINDOW};
