//! Converse library.
//!
//! A thin HTTP backend that persists chat messages and user/item records
//! in SQLite and relays conversation turns to an OpenAI-compatible
//! completion endpoint.
//!
//! # Architecture
//!
//! - Axum web framework
//! - sqlx repositories over a `SQLite` pool holding users, items, and
//!   chat history
//! - Completion client for the hosted model endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod openai;
pub mod routes;
pub mod services;
pub mod state;
