//! Bearer Credential Gate for gRPC Services
//!
//! This library sits between every inbound RPC and its handler. It decides
//! whether the called method needs a verified caller, validates the bearer
//! credential when it does, and hands the verified identity to the handler
//! through the request extensions.
//!
//! ## Core Components
//!
//! - **AccessPolicy**: exact-match allow-list of methods reachable anonymously
//! - **AuthGate**: the per-call decision (public / authenticated / rejected)
//! - **AuthLayer**: tower layer running the gate in front of a gRPC router
//! - **IdentityExt**: handler-side accessor for the verified caller
//! - **JwtClientInterceptor**: attaches `authorization: Bearer <token>` to outgoing calls
//!
//! ## Usage Example
//!
//! ### Server Side
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::Duration;
//! use crypto_core::JwtCodec;
//! use grpc_jwt_propagation::{AccessPolicy, AuthGate, AuthLayer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = Arc::new(JwtCodec::new(b"a-secret-of-at-least-thirty-two-bytes", Duration::hours(24))?);
//! let policy = AccessPolicy::new(["/pb.Post/ListPost", "/pb.Session/Login"]);
//! let layer = AuthLayer::new(AuthGate::new(codec, policy));
//!
//! // tonic::transport::Server::builder().layer(layer).add_service(...)
//! # Ok(())
//! # }
//! ```
//!
//! ### In a Handler
//!
//! ```rust,no_run
//! use grpc_jwt_propagation::IdentityExt;
//! use tonic::{Request, Response, Status};
//!
//! async fn delete_post(request: Request<()>) -> Result<Response<()>, Status> {
//!     // Verified by the gate; never taken from the payload
//!     let caller = request.current_subject()?;
//!     // delete where id = ... AND owner = caller
//!     # let _ = caller;
//!     Ok(Response::new(()))
//! }
//! ```
//!
//! ## Security Guarantees
//!
//! - Protected methods never reach the handler without a verified identity
//! - Public methods never see an identity, even one planted upstream
//! - Missing, malformed, forged and expired credentials all answer
//!   `UNAUTHENTICATED` with the same message

mod claims;
mod client;
mod error;
mod extensions;
mod policy;
mod server;

pub use claims::VerifiedIdentity;
pub use client::JwtClientInterceptor;
pub use error::{AuthError, UNAUTHENTICATED_MESSAGE};
pub use extensions::IdentityExt;
pub use policy::AccessPolicy;
pub use server::{AuthGate, AuthLayer, AuthMiddleware, AuthState};

// Re-export tonic Status for convenience
pub use tonic::Status;
