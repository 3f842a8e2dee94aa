//! Shared Module
//!
//! Types that do not depend on the HTTP server: the joke list, input
//! validation errors and the application configuration.

/// Joke data structure
pub mod joke;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use joke::{all_jokes, Joke};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, CloudinaryConfig, ConfigError};
