//! Core types and logic for the AIML Nexus department assistant.
//!
//! No database or terminal dependencies live here. The SQLite backend and
//! the TUI both build on this crate.

// Implementations of `KeyValueStore` write its methods as `async fn`.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod conversation;
pub mod data;
pub mod error;
pub mod intent;
pub mod message;
pub mod respond;
pub mod schedule;
pub mod section;
pub mod store;
pub mod voice;

pub use error::{Error, Result};
