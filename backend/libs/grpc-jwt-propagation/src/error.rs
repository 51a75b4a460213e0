//! Authentication failures and their wire representation

use crypto_core::CredentialError;
use thiserror::Error;
use tonic::{Code, Status};

/// Message sent for every credential failure; the reason stays in the logs
pub const UNAUTHENTICATED_MESSAGE: &str = "unauthenticated";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `authorization` entry, or an empty bearer value
    #[error("credential missing")]
    CredentialMissing,

    /// Present but rejected: malformed, bad signature, or expired
    #[error("credential invalid: {0}")]
    CredentialInvalid(#[from] CredentialError),

    /// A handler asked for the caller on a call the gate never authenticated
    #[error("verified identity not present in request context")]
    IdentityNotPresent,
}

impl AuthError {
    /// Convert to gRPC Status without leaking the sub-reason
    pub fn to_status(&self) -> Status {
        match self {
            AuthError::CredentialMissing | AuthError::CredentialInvalid(_) => {
                Status::new(Code::Unauthenticated, UNAUTHENTICATED_MESSAGE)
            }
            AuthError::IdentityNotPresent => Status::new(Code::Internal, "Internal server error"),
        }
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        if err == AuthError::IdentityNotPresent {
            tracing::error!("handler requested caller identity on an unauthenticated call");
        }
        err.to_status()
    }
}
