//! Server Module
//!
//! Server initialization, application state and store selection.
//!
//! - **`init`** - `create_app` and `build_state`
//! - **`state`** - `AppState`, the handles shared by all handlers
//! - **`config`** - PostgreSQL connection and store selection

pub mod config;
pub mod init;
pub mod state;

pub use init::{build_state, create_app, StartupError};
pub use state::AppState;
