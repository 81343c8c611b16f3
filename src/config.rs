//! Process configuration, read once at startup.
//!
//! Environment surface:
//! - `GITLAB_WEBHOOK_SECRET` - optional shared secret GitLab presents in the
//!   `X-Gitlab-Token` header; an empty value counts as unset.
//! - `CASCADE_BIND_ADDR` - socket address to listen on, default
//!   `0.0.0.0:8080`.
//!
//! The loaded values are immutable for the lifetime of the process; the
//! secret in particular is injected into the gateway state at construction
//! and never consulted from the environment again.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::info;

pub const ENV_WEBHOOK_SECRET: &str = "GITLAB_WEBHOOK_SECRET";
pub const ENV_BIND_ADDR: &str = "CASCADE_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} value {value:?}: {source}")]
    InvalidBindAddr {
        name: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub webhook_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an injected variable lookup.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr_value = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                name: ENV_BIND_ADDR,
                value: addr_value.clone(),
                source,
            })?;

        // An exported-but-empty secret is treated as unset rather than as a
        // configured empty string, which would silently require an empty
        // token on every delivery.
        let webhook_secret = lookup(ENV_WEBHOOK_SECRET).filter(|secret| !secret.is_empty());

        if webhook_secret.is_some() {
            info!("webhook secret configured, deliveries must present a matching token");
        } else {
            info!("no webhook secret configured, deliveries are accepted without a token");
        }

        Ok(Config {
            bind_addr,
            webhook_secret,
        })
    }
}
