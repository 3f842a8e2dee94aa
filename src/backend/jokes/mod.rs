//! Jokes Module
//!
//! The static joke list consumed by the frontend, and the root greeting.

pub mod handlers;

pub use handlers::{hello, list_jokes};
