//! Fallback address bundles for partially-specified request URLs.

use courier_core::config::CourierConfig;
use courier_core::error::CourierResult;
use typed_builder::TypedBuilder;

use crate::parse;

/// A configured fallback address.
///
/// Attached to a request URL, an address is consulted for any component the
/// URL leaves unset. It never receives writes, and it holds no computed
/// defaults — defaulting against the scheme is the URL's job at read time.
///
/// # Examples
///
/// ```
/// use courier_url::Address;
///
/// let address = Address::builder()
///     .scheme("https")
///     .host("api.example.com")
///     .base_path("/v2")
///     .build();
/// assert_eq!(address.host.as_deref(), Some("api.example.com"));
/// assert!(address.port.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct Address {
    /// URL scheme (e.g. `"https"`).
    #[builder(default, setter(into, strip_option))]
    pub scheme: Option<String>,

    /// Host name.
    #[builder(default, setter(into, strip_option))]
    pub host: Option<String>,

    /// Port.
    #[builder(default, setter(strip_option))]
    pub port: Option<i32>,

    /// Base path prepended to request paths.
    #[builder(default, setter(into, strip_option))]
    pub base_path: Option<String>,

    /// User-info (`user:password`).
    #[builder(default, setter(into, strip_option))]
    pub user_info: Option<String>,
}

impl Address {
    /// Address naming just a host and port.
    #[must_use]
    pub fn from_host_port(host: impl Into<String>, port: i32) -> Self {
        Self {
            scheme: None,
            host: Some(host.into()),
            port: Some(port),
            base_path: None,
            user_info: None,
        }
    }

    /// Parse a full base URL (e.g. `https://svc@host:8443/api`) into an address.
    ///
    /// The URL's path becomes the address's base path.
    ///
    /// # Errors
    ///
    /// Returns [`courier_core::CourierError::InvalidUrl`] when `url` is not
    /// an absolute URL.
    pub fn from_base_url(url: &str) -> CourierResult<Self> {
        let parsed = parse::parse_absolute_url(url)?;
        Ok(Self {
            scheme: parsed.scheme,
            host: parsed.host,
            port: parsed.port,
            base_path: parsed.path,
            user_info: parsed.user_info,
        })
    }

    /// Build the fallback address described by configuration.
    #[must_use]
    pub fn from_config(config: &CourierConfig) -> Self {
        Self {
            scheme: config.scheme.clone(),
            host: config.host.clone(),
            port: config.port,
            base_path: config.base_path.clone(),
            user_info: config.user_info.clone(),
        }
    }
}
