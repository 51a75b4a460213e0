/// Domain records for blog-service
pub mod post;
pub mod user;

pub use post::{Post, PostContent};
pub use user::{User, UserProfileUpdate};

use crate::error::{BlogError, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Parse an id received on the wire
pub fn parse_id(raw: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| BlogError::InvalidArgument(format!("{field} is not a valid id")))
}

/// Canonical form of a login name, shared by registration and login
pub fn normalize_account(raw: &str) -> &str {
    raw.trim()
}

pub(crate) fn to_timestamp(at: DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: at.timestamp(),
        nanos: at.timestamp_subsec_nanos() as i32,
    }
}
