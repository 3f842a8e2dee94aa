//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! ├── api_routes.rs   - Joke API
//! └── user_routes.rs  - User service under /api/v1/users
//! ```
//!
//! # Routes
//!
//! - `GET /` - greeting
//! - `GET /api/jokes` - joke list
//! - `/api/v1/users/*` - user service (see `user_routes`)
//! - `GET /static/*` - files from the public directory
//!
//! Unknown paths get a JSON 404.

/// Main router creation
pub mod router;

/// Joke API routes
pub mod api_routes;

/// User service routes
pub mod user_routes;

pub use router::create_router;
