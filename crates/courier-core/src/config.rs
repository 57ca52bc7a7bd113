//! Configuration for Courier clients.
//!
//! All configuration is driven by environment variables, so a deployment can
//! point every client in a process at one backend without code changes. The
//! address-shaped fields describe the fallback address applied to request
//! URLs that leave the corresponding component unset.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{CourierError, CourierResult};

/// Global configuration for Courier clients.
///
/// # Examples
///
/// ```
/// use courier_core::CourierConfig;
///
/// let config = CourierConfig::default();
/// assert!(config.host.is_none());
/// assert_eq!(config.log_level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CourierConfig {
    /// Fallback URL scheme (e.g. `"https"`).
    #[builder(default, setter(into, strip_option))]
    pub scheme: Option<String>,

    /// Fallback host.
    #[builder(default, setter(into, strip_option))]
    pub host: Option<String>,

    /// Fallback port.
    #[builder(default, setter(strip_option))]
    pub port: Option<i32>,

    /// Fallback base path prepended to request paths.
    #[builder(default, setter(into, strip_option))]
    pub base_path: Option<String>,

    /// Fallback URL user-info (`user:password`).
    #[builder(default, setter(into, strip_option))]
    pub user_info: Option<String>,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    String::from("info")
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            scheme: None,
            host: None,
            port: None,
            base_path: None,
            user_info: None,
            log_level: default_log_level(),
        }
    }
}

impl CourierConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `COURIER_SCHEME` | unset |
    /// | `COURIER_HOST` | unset |
    /// | `COURIER_PORT` | unset |
    /// | `COURIER_BASE_PATH` | unset |
    /// | `COURIER_USER_INFO` | unset |
    /// | `LOG_LEVEL` | `info` |
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Config`] if `COURIER_PORT` is set but is not
    /// an integer.
    pub fn from_env() -> CourierResult<Self> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("COURIER_SCHEME") {
            config.scheme = Some(v);
        }
        if let Ok(v) = std::env::var("COURIER_HOST") {
            config.host = Some(v);
        }
        if let Ok(v) = std::env::var("COURIER_PORT") {
            config.port = Some(parse_port(&v)?);
        }
        if let Ok(v) = std::env::var("COURIER_BASE_PATH") {
            config.base_path = Some(v);
        }
        if let Ok(v) = std::env::var("COURIER_USER_INFO") {
            config.user_info = Some(v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }
}

/// Parse a port value from configuration.
fn parse_port(value: &str) -> CourierResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| CourierError::Config(format!("COURIER_PORT must be an integer, got '{value}'")))
}
