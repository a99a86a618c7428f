//! Server configuration from environment variables.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use tracing::{info, warn};

use crate::cache::CacheConfig;
use crate::providers::{DEFAULT_TIMEOUT_SECS, ProviderConfig};
use crate::trips::ReconcileConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Directory served for the browser client
    pub static_dir: String,

    pub geonames_username: String,
    pub weatherbit_key: String,
    pub pixabay_key: String,
    pub positionstack_key: String,

    /// Per-request timeout for provider calls (seconds)
    pub provider_timeout_secs: u64,

    pub reconcile: ReconcileConfig,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            static_dir: "dist".to_string(),
            geonames_username: String::new(),
            weatherbit_key: String::new(),
            pixabay_key: String::new(),
            positionstack_key: String::new(),
            provider_timeout_secs: DEFAULT_TIMEOUT_SECS,
            reconcile: ReconcileConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    ///
    /// Missing credentials are logged and left empty; the affected provider
    /// then fails per request instead of preventing startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let reconcile = ReconcileConfig::new(
            parse_or(&lookup, "REFRESH_CONCURRENCY", defaults.reconcile.concurrency)?,
            non_zero(
                "RECONCILE_TIMEOUT_SECS",
                parse_or(&lookup, "RECONCILE_TIMEOUT_SECS", defaults.reconcile.timeout_secs)?,
            )?,
        );

        Ok(Self {
            host: parse_or(&lookup, "HOST", defaults.host)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            geonames_username: credential(&lookup, "GEONAMES_USERNAME"),
            weatherbit_key: credential(&lookup, "WEATHERBIT_APIKEY"),
            pixabay_key: credential(&lookup, "PIXABAY_APIKEY"),
            positionstack_key: credential(&lookup, "POSITIONSTACK_APIKEY"),
            provider_timeout_secs: non_zero(
                "PROVIDER_TIMEOUT_SECS",
                parse_or(&lookup, "PROVIDER_TIMEOUT_SECS", defaults.provider_timeout_secs)?,
            )?,
            reconcile,
            cache: defaults.cache,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<String>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Provider settings for the given credential.
    pub fn provider(&self, credential: &str) -> ProviderConfig {
        ProviderConfig::new(credential).with_timeout(self.provider_timeout_secs)
    }
}

fn credential(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> String {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value,
        None => {
            warn!("{key} not set, requests to that provider will fail");
            String::new()
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.clone(),
        message: e.to_string(),
    })
}

/// Timeouts of zero would fail every request at once.
fn non_zero(key: &'static str, secs: u64) -> Result<u64, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: secs.to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(secs)
}
