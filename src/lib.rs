//! VideoTube - Main Library
//!
//! Backend for the VideoTube tutorial project: a static joke API and a user
//! service with registration, JWT sessions and image uploads.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the HTTP server
//!   - Joke list, input validation errors, configuration
//!
//! - **`backend`** - Axum server
//!   - User store (PostgreSQL or in-memory), sessions, media uploads
//!   - Route configuration and error mapping
//!
//! # Usage
//!
//! ```rust,no_run
//! use videotube::backend::server::create_app;
//! use videotube::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder()
//!     .access_token_secret("access-secret")
//!     .refresh_token_secret("refresh-secret")
//!     .build()?;
//! let app = create_app(config).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` and `shared::config::ConfigError` for
//!   input and configuration problems
//! - `backend::error::BackendError` for everything a handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
