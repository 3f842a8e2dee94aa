//! User Handlers Module
//!
//! HTTP handlers for the user service, mounted under `/api/v1/users`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs              - Module exports and documentation
//! ├── types.rs            - Request and response types
//! ├── form.rs             - Multipart form reading and staging
//! ├── register.rs         - POST /register
//! ├── login.rs            - POST /login
//! ├── logout.rs           - POST /logout
//! ├── refresh.rs          - POST /refresh-token
//! ├── change_password.rs  - POST /change-password
//! ├── me.rs               - GET /current-user
//! ├── account.rs          - PATCH /update-account
//! └── images.rs           - POST /avatar-new, POST /cover-new
//! ```
//!
//! Every handler returns `BackendResult`, so failures share the
//! `{"error", "status"}` body.

/// Request and response types
pub mod types;

/// Multipart form reading
pub mod form;

pub mod register;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod change_password;

/// Get current user handler
pub mod me;

pub mod account;
pub mod images;

pub use types::{ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, UpdateAccountRequest};

pub use account::update_account;
pub use change_password::change_password;
pub use images::{update_avatar, update_cover_image};
pub use login::login;
pub use logout::logout;
pub use me::current_user;
pub use refresh::refresh_access_token;
pub use register::register;
