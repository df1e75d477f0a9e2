//! Domain models for users, items, and chat messages.

pub mod id;
pub mod item;
pub mod message;
pub mod user;

pub use id::{ItemId, MessageId, UserId};
pub use item::Item;
pub use message::Message;
pub use user::User;
