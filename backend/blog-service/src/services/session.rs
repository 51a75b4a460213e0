//! Session issuance: exchange account credentials for a bearer token

use crate::db::UserStore;
use crate::error::{BlogError, Result};
use crate::models::normalize_account;
use crypto_core::password::verify_against_dummy;
use crypto_core::{verify_password, JwtCodec};
use std::sync::Arc;
use tracing::{info, warn};

/// Freshly issued credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub subject_id: String,
}

/// Login flow over a user store and the shared codec
///
/// Unknown accounts and wrong passwords fail with distinct internal errors
/// (`AccountNotFound`, `CredentialRejected`) that map to one external status.
/// An unknown account still pays for a hash verification.
#[derive(Clone)]
pub struct SessionIssuer {
    users: Arc<dyn UserStore>,
    codec: Arc<JwtCodec>,
}

impl SessionIssuer {
    pub fn new(users: Arc<dyn UserStore>, codec: Arc<JwtCodec>) -> Self {
        Self { users, codec }
    }

    pub async fn login(&self, account: &str, password: &str) -> Result<IssuedSession> {
        let account = normalize_account(account);
        let Some(user) = self.users.find_user_by_account(account).await? else {
            verify_against_dummy(password);
            warn!("login failed: unknown account");
            return Err(BlogError::AccountNotFound);
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "login failed: password mismatch");
            return Err(BlogError::CredentialRejected);
        }

        let subject_id = user.id.to_string();
        let token = self.codec.issue(&subject_id)?;

        info!(user_id = %subject_id, "session issued");
        Ok(IssuedSession { token, subject_id })
    }
}
