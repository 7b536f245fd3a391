//! Environment-driven server configuration.

use std::net::SocketAddr;

use chrono::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::domain::policy::TransferUpdateAccess;
use crate::domain::rate_limit::RateQuota;
use crate::domain::token::{DEFAULT_TOKEN_VALIDITY_DAYS, TokenSecret};

/// Configuration failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No signing secret and no permission to generate an ephemeral one.
    #[error(
        "TOKEN_SECRET is not set; provide one, or set TOKEN_ALLOW_EPHEMERAL=1 for development"
    )]
    MissingTokenSecret,
    /// The bind address did not parse.
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// The token validity did not parse as a day count.
    #[error("invalid TOKEN_VALIDITY_DAYS {value:?}")]
    InvalidTokenValidity {
        /// The rejected value.
        value: String,
    },
    /// The transfer-update access mode did not parse.
    #[error(transparent)]
    InvalidTransferAccess(#[from] crate::domain::policy::UnknownAccessMode),
}

/// Settings assembled once at startup and passed into the state builder.
#[derive(Debug)]
pub struct ServerConfig {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Process-wide token signing secret.
    pub token_secret: TokenSecret,
    /// Lifetime of issued tokens.
    pub token_validity: Duration,
    /// Who may overwrite incident transfer fields.
    pub transfer_update_access: TransferUpdateAccess,
    /// Attempt budget for registration, per origin.
    pub registration_quota: RateQuota,
    /// Attempt budget for login, per origin.
    pub login_quota: RateQuota,
    /// Whether to seed the hospital reference set when empty.
    pub seed_reference_data: bool,
}

/// Registration attempts allowed per origin per minute.
const REGISTRATION_PER_MINUTE: u32 = 5;
/// Login attempts allowed per origin per minute.
const LOGIN_PER_MINUTE: u32 = 10;

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// `TOKEN_SECRET` is mandatory in release builds; debug builds (or
    /// `TOKEN_ALLOW_EPHEMERAL=1`) fall back to a random secret, which
    /// invalidates all tokens on restart.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_secret = match std::env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => TokenSecret::new(secret.into_bytes()),
            _ => {
                let allow_dev =
                    std::env::var("TOKEN_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("using ephemeral token secret (dev only); tokens die with the process");
                    let mut bytes = Vec::with_capacity(32);
                    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
                    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
                    TokenSecret::new(bytes)
                } else {
                    return Err(ConfigError::MissingTokenSecret);
                }
            }
        };

        let bind_raw =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
        let bind_addr = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_raw,
                source,
            })?;

        let token_validity = match std::env::var("TOKEN_VALIDITY_DAYS") {
            Ok(raw) => {
                let days: i64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTokenValidity { value: raw })?;
                Duration::days(days)
            }
            Err(_) => Duration::days(DEFAULT_TOKEN_VALIDITY_DAYS),
        };

        let transfer_update_access = match std::env::var("TRANSFER_UPDATE_ACCESS") {
            Ok(raw) => raw.parse()?,
            Err(_) => TransferUpdateAccess::default(),
        };

        let seed_reference_data = std::env::var("SEED_REFERENCE_DATA")
            .map(|v| v != "0")
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            token_secret,
            token_validity,
            transfer_update_access,
            registration_quota: RateQuota::per_minute(REGISTRATION_PER_MINUTE),
            login_quota: RateQuota::per_minute(LOGIN_PER_MINUTE),
            seed_reference_data,
        })
    }
}
