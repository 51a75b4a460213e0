/// Blog Service Library
///
/// gRPC backend for posts, user profiles and login sessions. Every call passes
/// the bearer-credential gate from `grpc-jwt-propagation` before it reaches a
/// handler.
///
/// ## Modules
///
/// - `config`: Service configuration
/// - `db`: Storage traits and the in-process store
/// - `error`: Error types
/// - `grpc`: gRPC handlers, public method table and router assembly
/// - `models`: Domain records
/// - `pb`: Wire messages and generated service stubs
/// - `services`: Session issuance (login)
pub mod config;
pub mod db;
pub mod error;
pub mod grpc;
pub mod models;
pub mod pb;
pub mod services;

// Re-export commonly used types
pub use error::{BlogError, Result};
pub use grpc::{access_policy, router, AppState, PUBLIC_METHODS};
