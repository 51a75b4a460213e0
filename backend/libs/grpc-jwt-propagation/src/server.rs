//! Server-side authentication gate
//!
//! Runs in front of the gRPC router as a tower layer, so it sees the full
//! method path of every call before any handler is selected.

use crate::claims::VerifiedIdentity;
use crate::error::AuthError;
use crate::policy::AccessPolicy;
use crypto_core::{CredentialError, JwtCodec};
use futures::future::{self, Either, Ready};
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::HeaderMap;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of the gate for one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Public method; the handler must not assume a caller
    Unauthenticated,
    /// Protected method with a verified caller
    Authenticated(VerifiedIdentity),
}

/// Per-call authentication decision
///
/// Holds only read-only state (policy table and codec), so one instance is
/// shared by every concurrent call without locking.
#[derive(Debug)]
pub struct AuthGate {
    codec: Arc<JwtCodec>,
    policy: AccessPolicy,
}

impl AuthGate {
    pub fn new(codec: Arc<JwtCodec>, policy: AccessPolicy) -> Self {
        Self { codec, policy }
    }

    /// Decide whether a call to `method` carrying `headers` may proceed
    ///
    /// ## Errors
    ///
    /// - `CredentialMissing`: protected method without a bearer value
    /// - `CredentialInvalid`: bearer value present but malformed, forged or expired
    pub fn authorize(&self, method: &str, headers: &HeaderMap) -> Result<AuthState, AuthError> {
        if self.policy.is_public(method) {
            return Ok(AuthState::Unauthenticated);
        }

        let token = bearer_token(headers)?;
        let claims = self.codec.verify(token)?;

        Ok(AuthState::Authenticated(VerifiedIdentity::from_claims(claims)))
    }
}

/// Extract the token from `authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::CredentialMissing)?;

    let value = value.to_str().map_err(|_| {
        CredentialError::Malformed("authorization header is not valid ASCII".to_string())
    })?;

    let token = value.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        CredentialError::Malformed("expected 'Bearer <token>' authorization".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::CredentialMissing);
    }

    Ok(token)
}

/// Trailers-only gRPC response carrying the rejection status
fn rejection<B: Default>(err: &AuthError) -> http::Response<B> {
    let status = err.to_status();
    let mut response = http::Response::new(B::default());

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/grpc"));
    headers.insert("grpc-status", HeaderValue::from(status.code() as i32));
    if let Ok(message) = HeaderValue::from_str(status.message()) {
        headers.insert("grpc-message", message);
    }

    response
}

/// Tower layer installing [`AuthMiddleware`] in front of a service
#[derive(Debug, Clone)]
pub struct AuthLayer {
    gate: Arc<AuthGate>,
}

impl AuthLayer {
    pub fn new(gate: AuthGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, service: S) -> Self::Service {
        AuthMiddleware {
            inner: service,
            gate: Arc::clone(&self.gate),
        }
    }
}

/// Pipeline stage that runs the gate and either forwards or rejects
///
/// On success the verified identity is inserted into this request's own
/// extensions. On public calls any identity already present is removed. On
/// failure the inner service is never called.
#[derive(Debug, Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    gate: Arc<AuthGate>,
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for AuthMiddleware<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>,
    ResBody: Default,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Either<S::Future, Ready<Result<S::Response, S::Error>>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<ReqBody>) -> Self::Future {
        let decision = self.gate.authorize(req.uri().path(), req.headers());

        match decision {
            Ok(AuthState::Authenticated(identity)) => {
                debug!(
                    method = %req.uri().path(),
                    subject_id = %identity.subject_id,
                    "credential verified"
                );
                req.extensions_mut().insert(identity);
                Either::Left(self.inner.call(req))
            }
            Ok(AuthState::Unauthenticated) => {
                req.extensions_mut().remove::<VerifiedIdentity>();
                Either::Left(self.inner.call(req))
            }
            Err(err) => {
                warn!(method = %req.uri().path(), reason = %err, "call rejected");
                Either::Right(future::ready(Ok(rejection(&err))))
            }
        }
    }
}
