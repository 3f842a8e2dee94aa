//! Authentication Module
//!
//! User accounts, password hashing, JWT sessions and the HTTP handlers of
//! the user service.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User record, public view, normalisation
//! ├── store/          - UserStore trait (PostgreSQL and in-memory)
//! ├── password.rs     - bcrypt hashing
//! ├── sessions.rs     - Access/refresh JWTs
//! ├── cookies.rs      - Session cookies
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: multipart form with avatar → user created (no session)
//! 2. **Login**: username or email plus password → token pair, stored refresh
//!    token, both tokens set as cookies
//! 3. **Authenticated requests**: access token from cookie or bearer header,
//!    verified by `middleware::auth`
//! 4. **Refresh**: refresh token must equal the stored one; it is rotated
//! 5. **Logout**: stored refresh token cleared, cookies removed
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt; hashes never leave the store layer
//! - Only one refresh token per user is valid at a time
//! - Access and refresh tokens are signed with different secrets

/// User data model
pub mod users;

/// Persistent user storage
pub mod store;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Session cookies
pub mod cookies;

/// HTTP handlers for the user endpoints
pub mod handlers;

pub use sessions::{TokenIssuer, TokenPair};
pub use store::{MemoryUserStore, PgUserStore, SharedUserStore, UserStore};
pub use users::{PublicUser, User};
