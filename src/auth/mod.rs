//! Authentication Module
//!
//! User registration, login, status, and the token machinery behind them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports
//! ├── tokens.rs       - TokenManager: JWT issue/verify
//! ├── credentials.rs  - Password hashing off the async runtime
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - Login handler
//!     └── status.rs   - Status get/set handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email + name + password → validated → user created (201)
//! 2. **Login**: email + password → verified → JWT token returned (1h TTL)
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` verified by
//!    the guard in [`crate::middleware`] before any protected handler runs

/// JWT token issuing and verification
pub mod tokens;

/// Password hashing and verification
pub mod credentials;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_status, login, signup, update_status};
pub use tokens::{Claims, TokenError, TokenManager};
