//! Request Extension Trait for the Verified Caller
//!
//! Reads back the identity the gate injected. Handlers performing
//! owner-scoped mutations use [`IdentityExt::current_subject`] as the owner
//! predicate and never trust an id carried in the request payload.

use crate::claims::VerifiedIdentity;
use crate::error::AuthError;
use tonic::Request;

/// Extension trait for accessing the verified caller from a request
///
/// Implemented for `tonic::Request<T>` (inside handlers) and
/// `http::Request<B>` (inside other tower stages).
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::IdentityExt;
/// use tonic::{Request, Response, Status};
///
/// async fn update_profile(request: Request<()>) -> Result<Response<()>, Status> {
///     let caller = request.current_subject()?;
///     // update users set ... where id = caller
///     # let _ = caller;
///     Ok(Response::new(()))
/// }
/// ```
pub trait IdentityExt {
    /// Identity stored by the gate for this call
    ///
    /// ## Errors
    ///
    /// `AuthError::IdentityNotPresent` if the call went through the public
    /// path or never passed the gate.
    fn verified_identity(&self) -> Result<&VerifiedIdentity, AuthError>;

    /// Subject id of the verified caller
    fn current_subject(&self) -> Result<&str, AuthError> {
        self.verified_identity()
            .map(|identity| identity.subject_id.as_str())
    }
}

impl<T> IdentityExt for Request<T> {
    fn verified_identity(&self) -> Result<&VerifiedIdentity, AuthError> {
        self.extensions()
            .get::<VerifiedIdentity>()
            .ok_or(AuthError::IdentityNotPresent)
    }
}

impl<B> IdentityExt for http::Request<B> {
    fn verified_identity(&self) -> Result<&VerifiedIdentity, AuthError> {
        self.extensions()
            .get::<VerifiedIdentity>()
            .ok_or(AuthError::IdentityNotPresent)
    }
}
