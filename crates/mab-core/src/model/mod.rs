//! Completion endpoint port and request types.

pub mod client;
pub mod types;
