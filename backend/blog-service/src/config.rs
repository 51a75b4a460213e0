//! Configuration management for Blog Service
//!
//! Loads settings from environment variables, with a `.env` file honoured in
//! debug builds for local development.
//!
//! # Example
//!
//! ```no_run
//! use blog_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("listening on {}:{}", settings.server.host, settings.server.port);
//!     Ok(())
//! }
//! ```

use anyhow::{bail, Context, Result};
use chrono::Duration;
use crypto_core::jwt::{DEFAULT_TOKEN_DURATION_HOURS, MIN_SECRET_LENGTH};
use crypto_core::JwtCodec;
use std::env;
use std::fmt;
use std::net::SocketAddr;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt: JwtSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Settings {
            jwt: JwtSettings::from_lookup(&lookup)?,
            server: ServerSettings::from_lookup(&lookup)?,
        })
    }
}

/// Credential signing settings
#[derive(Clone)]
pub struct JwtSettings {
    /// HMAC signing secret; required, no default
    pub secret: String,
    pub token_duration_hours: i64,
}

impl JwtSettings {
    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.len() < MIN_SECRET_LENGTH {
            bail!(
                "JWT_SECRET must be at least {} bytes (got {})",
                MIN_SECRET_LENGTH,
                secret.len()
            );
        }

        let token_duration_hours: i64 = lookup("JWT_TOKEN_DURATION_HOURS")
            .unwrap_or_else(|| DEFAULT_TOKEN_DURATION_HOURS.to_string())
            .parse()
            .context("Invalid JWT_TOKEN_DURATION_HOURS")?;
        if token_duration_hours <= 0 {
            bail!("JWT_TOKEN_DURATION_HOURS must be positive");
        }

        Ok(Self {
            secret,
            token_duration_hours,
        })
    }

    pub fn token_duration(&self) -> Duration {
        Duration::hours(self.token_duration_hours)
    }

    /// Build the credential codec shared by the gate and login
    pub fn codec(&self) -> Result<JwtCodec> {
        JwtCodec::new(self.secret.as_bytes(), self.token_duration())
            .context("Failed to initialize JWT codec")
    }
}

impl fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"<redacted>")
            .field("token_duration_hours", &self.token_duration_hours)
            .finish()
    }
}

/// gRPC listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("GRPC_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("GRPC_PORT")
                .unwrap_or_else(|| "8081".to_string())
                .parse()
                .context("Invalid GRPC_PORT")?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid server address")
    }
}
