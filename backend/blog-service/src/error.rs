use crypto_core::{CredentialError, PasswordError};
use grpc_jwt_propagation::AuthError;
use thiserror::Error;
use tonic::{Code, Status};

pub type Result<T> = std::result::Result<T, BlogError>;

/// External message shared by both login failures
pub const LOGIN_FAILED_MESSAGE: &str = "invalid account or password";

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Account already exists")]
    AccountAlreadyExists,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Credential rejected")]
    CredentialRejected,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Credential issuance error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Convert to gRPC Status for wire protocol
    pub fn to_status(&self) -> Status {
        match self {
            BlogError::PostNotFound => Status::new(Code::NotFound, "Post not found"),
            BlogError::UserNotFound => Status::new(Code::NotFound, "User not found"),
            BlogError::AccountAlreadyExists => {
                Status::new(Code::AlreadyExists, "Account already exists")
            }
            BlogError::AccountNotFound | BlogError::CredentialRejected => {
                Status::new(Code::Unauthenticated, LOGIN_FAILED_MESSAGE)
            }
            BlogError::InvalidArgument(msg) => Status::new(Code::InvalidArgument, msg.clone()),
            BlogError::PermissionDenied(msg) => Status::new(Code::PermissionDenied, msg.clone()),
            BlogError::Auth(err) => err.to_status(),
            BlogError::Password(PasswordError::Empty) => {
                Status::new(Code::InvalidArgument, "password must not be empty")
            }
            BlogError::Password(_)
            | BlogError::Credential(_)
            | BlogError::Store(_)
            | BlogError::Internal(_) => Status::new(Code::Internal, "Internal server error"),
        }
    }
}

impl From<BlogError> for Status {
    fn from(err: BlogError) -> Self {
        match &err {
            BlogError::Auth(AuthError::IdentityNotPresent) => {
                tracing::error!("handler requested caller identity on an unauthenticated call");
            }
            BlogError::Password(PasswordError::Empty) => {}
            BlogError::Password(_)
            | BlogError::Credential(_)
            | BlogError::Store(_)
            | BlogError::Internal(_) => {
                tracing::error!(error = %err, "request failed");
            }
            _ => {}
        }
        err.to_status()
    }
}
