/// Bearer credential codec for the blog backend
///
/// Credentials are compact JWTs (`header.payload.signature`) signed with
/// HS256 over a symmetric server secret. A credential carries the subject
/// (account id), its issue time and its expiry; nothing is stored
/// server-side.
///
/// ## Security Design
///
/// - **HS256 ONLY**: tokens whose header names any other algorithm are rejected
/// - **No hardcoded keys**: the secret is supplied at construction
/// - **Immutable**: secret and lifetime are fixed once the codec is built
///
/// ## Usage
///
/// ```rust
/// use chrono::Duration;
/// use crypto_core::jwt::JwtCodec;
///
/// let codec = JwtCodec::new(b"an-example-secret-of-at-least-32-bytes", Duration::hours(24))
///     .expect("valid configuration");
///
/// let token = codec.issue("user-42").expect("signing never fails for HS256");
/// let claims = codec.verify(&token).expect("fresh token verifies");
/// assert_eq!(claims.sub, "user-42");
/// ```
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Default credential lifetime
pub const DEFAULT_TOKEN_DURATION_HOURS: i64 = 24;

/// Minimum accepted secret length (256 bits)
pub const MIN_SECRET_LENGTH: usize = 32;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by every credential
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token identifier
    pub jti: String,
}

/// Reasons a credential can fail to be produced or accepted
///
/// Callers outside the service only ever see a single "unauthenticated"
/// outcome; the variants exist for diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential is malformed: {0}")]
    Malformed(String),

    #[error("credential signature is invalid")]
    SignatureInvalid,

    #[error("credential has expired")]
    Expired,

    #[error("failed to sign credential: {0}")]
    Signing(String),

    #[error("invalid credential configuration: {0}")]
    Config(String),
}

// ============================================================================
// Codec
// ============================================================================

/// Issues and verifies HS256 credentials
///
/// Cheap to share behind an `Arc`; every method takes `&self` and the codec
/// holds no mutable state.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_duration: Duration,
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &JWT_ALGORITHM)
            .field("token_duration", &self.token_duration)
            .finish_non_exhaustive()
    }
}

impl JwtCodec {
    /// Build a codec from the server secret and the credential lifetime
    ///
    /// ## Errors
    ///
    /// Returns `CredentialError::Config` if:
    /// - the secret is shorter than [`MIN_SECRET_LENGTH`] bytes
    /// - the lifetime is not strictly positive
    pub fn new(secret: &[u8], token_duration: Duration) -> Result<Self, CredentialError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(CredentialError::Config(format!(
                "secret must be at least {MIN_SECRET_LENGTH} bytes, got {}",
                secret.len()
            )));
        }

        if token_duration <= Duration::zero() {
            return Err(CredentialError::Config(
                "token duration must be positive".to_string(),
            ));
        }

        // Expiry is checked against an explicit clock in `verify_at`, so the
        // library's own wall-clock check is disabled. `exp` and `sub` must
        // still be present.
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_duration,
        })
    }

    /// Lifetime applied to every issued credential
    pub fn token_duration(&self) -> Duration {
        self.token_duration
    }

    /// Issue a credential for `subject`, valid from now for the configured lifetime
    pub fn issue(&self, subject: &str) -> Result<String, CredentialError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a credential as if the current time were `now`
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, CredentialError> {
        if subject.is_empty() {
            return Err(CredentialError::Signing("subject must not be empty".to_string()));
        }

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_duration).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    /// Verify a credential against the server secret and the current time
    ///
    /// ## Errors
    ///
    /// - `Malformed`: not a parseable JWT, or required claims missing
    /// - `SignatureInvalid`: signature mismatch or unexpected algorithm
    /// - `Expired`: `exp` is not in the future
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a credential as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, CredentialError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(classify)?;
        let claims = token_data.claims;

        if claims.sub.is_empty() {
            return Err(CredentialError::Malformed("empty subject".to_string()));
        }

        if now.timestamp() >= claims.exp {
            return Err(CredentialError::Expired);
        }

        Ok(claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> CredentialError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            CredentialError::SignatureInvalid
        }
        ErrorKind::ExpiredSignature => CredentialError::Expired,
        _ => CredentialError::Malformed(err.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
