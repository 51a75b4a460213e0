//! Client-side credential attachment
//!
//! Adds `authorization: Bearer <token>` to every outgoing call, which is the
//! format the server-side gate expects.

use crate::error::AuthError;
use crypto_core::CredentialError;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

/// Interceptor holding a pre-formatted authorization value
///
/// ## Usage
///
/// ```rust,no_run
/// use grpc_jwt_propagation::JwtClientInterceptor;
/// use tonic::transport::Channel;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = "eyJhbGc..."; // From Session/Login
/// let interceptor = JwtClientInterceptor::new(token)?;
///
/// let channel = Channel::from_static("http://[::1]:8081").connect().await?;
/// // let mut client = PostClient::with_interceptor(channel, interceptor);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JwtClientInterceptor {
    auth_header: AsciiMetadataValue,
}

impl JwtClientInterceptor {
    /// Create an interceptor for `token` (without the `Bearer ` prefix)
    ///
    /// ## Errors
    ///
    /// `CredentialInvalid(Malformed)` if the token cannot be carried in an
    /// ASCII metadata value. Compact JWTs never trigger this.
    pub fn new(token: impl AsRef<str>) -> Result<Self, AuthError> {
        let value = format!("Bearer {}", token.as_ref());
        let auth_header = AsciiMetadataValue::try_from(value).map_err(|_| {
            CredentialError::Malformed("token is not a valid metadata value".to_string())
        })?;

        Ok(Self { auth_header })
    }
}

impl Interceptor for JwtClientInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert("authorization", self.auth_header.clone());

        Ok(request)
    }
}
