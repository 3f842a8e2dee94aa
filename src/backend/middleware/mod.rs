//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session middleware for protected user routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware::from_fn_with_state, routing::post, Router};
//! use videotube::backend::middleware::auth_middleware;
//! use videotube::backend::server::state::AppState;
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         // .route("/logout", post(logout))
//!         .route_layer(from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, extract_token, AuthUser, AuthenticatedUser};
