//! Core domain + application logic for the marketing assistant bot.
//!
//! This crate is framework-agnostic. Telegram, the completion API and the web
//! page fetcher live behind ports (traits) implemented in adapter crates.

pub mod assistant;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod errors;
pub mod formatting;
pub mod handlers;
pub mod history;
pub mod logging;
pub mod messaging;
pub mod model;
pub mod prompt;
pub mod router;
pub mod texts;

pub use errors::{Error, Result};
