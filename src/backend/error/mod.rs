//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions and conversions from lower layers
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, allowing it to be returned
//! directly from handlers as a JSON body with the matching status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

/// Result alias used by handlers
pub type BackendResult<T> = Result<T, BackendError>;
