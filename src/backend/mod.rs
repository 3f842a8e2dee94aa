//! Backend Module
//!
//! All server-side code: an Axum HTTP server exposing the joke API and the
//! user service.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, store selection
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, stores, passwords, tokens, cookies, handlers
//! - **`middleware`** - Session middleware
//! - **`media`** - Upload staging and media hosts
//! - **`jokes`** - Joke API
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and user service
//! ├── middleware/     - Request middleware
//! ├── media/          - Media uploads
//! ├── jokes/          - Joke API
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers receive an `AppState` holding `Arc` handles to the user store,
//! the token issuer, the media uploader and the configuration. There is no
//! global state; tests build their own `AppState` around an in-memory store.
//!
//! # Example
//!
//! ```rust,no_run
//! use videotube::backend::server::create_app;
//! use videotube::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Media uploads
pub mod media;

/// Joke API
pub mod jokes;

pub use error::BackendError;
pub use server::create_app;
