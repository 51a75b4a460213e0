//! Verified caller identity carried through request extensions

use crypto_core::Claims;

/// Identity of the caller, produced by the gate after a credential verifies
///
/// Inserted into the extensions of the one request it was verified for and
/// dropped with it. Extensions are keyed by type, so this struct is the
/// well-known key handlers read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Subject (account id) asserted by the credential; never empty
    pub subject_id: String,

    /// Issued at (Unix timestamp)
    pub issued_at: i64,

    /// Expiration (Unix timestamp)
    pub expires_at: i64,
}

impl VerifiedIdentity {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
