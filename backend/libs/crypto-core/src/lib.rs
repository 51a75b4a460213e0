//! Credential primitives shared by the blog backend.
//!
//! - [`jwt`]: HS256 bearer credential codec (issue / verify)
//! - [`password`]: Argon2id password hashing for account credentials

pub mod jwt;
pub mod password;

pub use jwt::{Claims, CredentialError, JwtCodec};
pub use password::{hash_password, verify_password, PasswordError};
