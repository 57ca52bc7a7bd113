//! The request URL value object.
//!
//! [`RequestUrl`] composes the final outbound URL from several
//! independently-settable sources: explicit fields, placeholder templates
//! resolved against a bound call, and an attached fallback [`Address`].
//! Every accessor resolves with the same precedence — explicit value, then
//! attached address, then the hard default — and the rendered string is
//! cached until the next mutation.
//!
//! One instance belongs to one outbound request. Concurrent calls must each
//! own their own instance (a clone or a fresh construction); sharing one
//! instance's mutable state across in-flight calls is a precondition
//! violation, not something this type guards against with locks.

use std::sync::Arc;

use courier_core::args::CallRef;
use courier_core::error::{CourierError, CourierResult};
use courier_core::template::UrlTemplate;
use http::Uri;

use crate::address::Address;
use crate::encode::{ensure_leading_slash, path_encode, user_info_encode};
use crate::parse;
use crate::route::Route;
use crate::variable::RequestVar;

/// Whether `port` is the "no port" sentinel (unset or negative).
#[must_use]
pub fn is_none_port(port: Option<i32>) -> bool {
    port.is_none_or(|p| p < 0)
}

/// Resolve `port` against the scheme's default: 443 under SSL, 80 otherwise.
///
/// Pure; applied at every read site and never written back, so a later
/// scheme change retroactively changes the effective default port.
#[must_use]
pub fn normalize_port(port: Option<i32>, ssl: bool) -> i32 {
    match port {
        Some(p) if p >= 0 => p,
        _ => {
            if ssl {
                443
            } else {
                80
            }
        }
    }
}

/// Cached rendering of a [`RequestUrl`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum RenderCache {
    /// The fields changed since the last rendering (or none was produced yet).
    #[default]
    Stale,
    /// A rendering that reflects the current fields.
    Cached(String),
}

/// A mutable request URL assembled from explicit fields, call-bound
/// templates, and an optional fallback address.
///
/// Cloning produces a fully independent copy: no component cell is shared
/// between a clone and its source (the attached [`Address`] is shared, but
/// it is immutable).
///
/// # Examples
///
/// ```
/// use courier_url::RequestUrl;
///
/// let mut url = RequestUrl::default();
/// url.set_scheme("https").set_host("api.example.com");
/// url.set_path("/v1/users");
/// assert_eq!(url.generated_url(), "https://api.example.com/v1/users");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestUrl {
    scheme: Option<String>,
    user_info: Option<String>,
    host: RequestVar<String>,
    port: RequestVar<i32>,
    base_path: RequestVar<String>,
    path: RequestVar<String>,
    fragment: Option<String>,
    ssl: bool,
    address: Option<Arc<Address>>,
    rendered: RenderCache,
}

impl RequestUrl {
    /// Parse a literal URL into a request URL.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when `url` is empty or not an
    /// absolute URL.
    pub fn from_literal(url: &str) -> CourierResult<Self> {
        let parsed = parse::parse_absolute_url(url)?;
        let mut out = Self::default();
        if let Some(scheme) = parsed.scheme.as_deref() {
            out.set_scheme(scheme);
        }
        if let Some(host) = parsed.host {
            out.host.set(host);
        }
        out.port.set(parsed.port.unwrap_or(-1));
        if let Some(path) = parsed.path {
            out.path.set(path);
        }
        out.user_info = parsed.user_info;
        out.fragment = parsed.fragment;
        Ok(out)
    }

    /// Build a request URL from discrete components.
    ///
    /// Absent components stay unset and resolve through the attached address
    /// or the defaults.
    #[must_use]
    pub fn from_parts(
        scheme: Option<String>,
        user_info: Option<String>,
        host: Option<String>,
        port: Option<i32>,
        path: Option<String>,
        fragment: Option<String>,
    ) -> Self {
        let mut out = Self::default();
        if let Some(scheme) = scheme {
            out.set_scheme(&scheme);
        }
        out.user_info = user_info;
        if let Some(host) = host {
            out.host.set(host);
        }
        if let Some(port) = port {
            out.port.set(port);
        }
        if let Some(path) = path {
            out.path.set(path);
        }
        out.fragment = fragment;
        out
    }

    // -----------------------------------------------------------------------
    // Precedence accessors: explicit value, then attached address, then the
    // hard default.
    // -----------------------------------------------------------------------

    /// Effective scheme.
    #[must_use]
    pub fn scheme(&self) -> String {
        first_non_empty([
            self.scheme.clone(),
            self.address.as_ref().and_then(|a| a.scheme.clone()),
        ])
        .unwrap_or_else(|| if self.ssl { "https" } else { "http" }.to_owned())
    }

    /// Effective host.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        first_non_empty([
            self.host.get(),
            self.address.as_ref().and_then(|a| a.host.clone()),
        ])
    }

    /// Effective port, normalized against the current scheme's default.
    #[must_use]
    pub fn port(&self) -> i32 {
        let explicit = self.port.get();
        if is_none_port(explicit) {
            if let Some(address) = &self.address {
                return normalize_port(address.port, self.ssl);
            }
        }
        normalize_port(explicit, self.ssl)
    }

    /// Effective user-info.
    #[must_use]
    pub fn user_info(&self) -> Option<String> {
        first_non_empty([
            self.user_info.clone(),
            self.address.as_ref().and_then(|a| a.user_info.clone()),
        ])
    }

    /// Effective base path, normalized to carry a leading `/` when non-empty.
    #[must_use]
    pub fn normalized_base_path(&self) -> String {
        let base = first_non_empty([
            self.base_path.get(),
            self.address.as_ref().and_then(|a| a.base_path.clone()),
        ]);
        base.map(|p| ensure_leading_slash(&p)).unwrap_or_default()
    }

    /// Request path, normalized to carry a leading `/` when non-empty.
    #[must_use]
    pub fn path(&self) -> String {
        self.path
            .get()
            .map(|p| ensure_leading_slash(&p))
            .unwrap_or_default()
    }

    /// Fragment (the part after `#`), when one is set.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether the URL targets an SSL scheme.
    #[must_use]
    pub fn is_ssl(&self) -> bool {
        if non_empty(self.scheme.as_deref()).is_none() {
            if let Some(address) = &self.address {
                return address.scheme.as_deref() == Some("https");
            }
        }
        self.ssl
    }

    // -----------------------------------------------------------------------
    // Setters. Every mutation invalidates the cached rendering, even when the
    // new value equals the old one.
    // -----------------------------------------------------------------------

    /// Set the scheme. Blank input is a no-op.
    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        let trimmed = scheme.trim();
        if trimmed.is_empty() {
            return self;
        }
        self.scheme = Some(trimmed.to_owned());
        self.refresh_ssl();
        self.mark_stale();
        self
    }

    /// Set the host, stripping one trailing `/`. Blank input is a no-op.
    pub fn set_host(&mut self, host: &str) -> &mut Self {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return self;
        }
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        self.host.set(trimmed.to_owned());
        self.mark_stale();
        self
    }

    /// Set the port. Negative values mean "no port".
    pub fn set_port(&mut self, port: i32) -> &mut Self {
        self.port.set(port);
        self.mark_stale();
        self
    }

    /// Set the user-info (`user:password`).
    pub fn set_user_info(&mut self, user_info: &str) -> &mut Self {
        self.user_info = Some(user_info.trim().to_owned());
        self.mark_stale();
        self
    }

    /// Set the request path.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path.set(path.trim().to_owned());
        self.mark_stale();
        self
    }

    /// Set the fragment.
    ///
    /// The fragment is appended outside the cached rendering (see
    /// [`Self::full_url`]), so this does not invalidate the cache.
    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = Some(fragment.trim().to_owned());
        self
    }

    /// Set the base path, overwriting URL-derived fields (forced mode).
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when `base_path` looks like a URL
    /// but fails to parse.
    pub fn set_base_path(&mut self, base_path: &str) -> CourierResult<&mut Self> {
        self.set_base_path_with(base_path, true)
    }

    /// Set the base path.
    ///
    /// A value that is itself an absolute URL also carries scheme, user-info,
    /// host, and port; `forced` controls whether those overwrite components
    /// the URL already has, or only fill the empty ones. The port is written
    /// in the non-forced case only when no port is set *and* the host was
    /// empty before this call — an explicitly-hosted URL never has its port
    /// changed underneath it.
    ///
    /// A relative value without a leading `/` prepends `/` to whatever the
    /// base path currently holds.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when `base_path` looks like a URL
    /// but fails to parse.
    pub fn set_base_path_with(&mut self, base_path: &str, forced: bool) -> CourierResult<&mut Self> {
        let value = base_path.trim();
        if value.starts_with('/') {
            self.base_path.set(value.to_owned());
        } else if parse::is_url_literal(value) {
            let origin_host = self.host.get();
            let parsed = parse::parse_absolute_url(value)?;
            if forced || non_empty(self.scheme.as_deref()).is_none() {
                if let Some(scheme) = parsed.scheme.as_deref() {
                    self.set_scheme(scheme);
                }
            }
            if forced || non_empty(self.user_info.as_deref()).is_none() {
                self.user_info = parsed.user_info;
            }
            if forced || self.host.is_null() {
                if let Some(host) = parsed.host {
                    self.host.set(host);
                }
            }
            if forced
                || (is_none_port(self.port.get()) && non_empty(origin_host.as_deref()).is_none())
            {
                self.port.set(parsed.port.unwrap_or(-1));
            }
            self.base_path.set(parsed.path.unwrap_or_default());
        } else {
            // Prepends onto the value already held, not onto the input.
            let current = self.base_path.get().unwrap_or_default();
            self.base_path.set(format!("/{current}"));
        }
        self.mark_stale();
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Address handling
    // -----------------------------------------------------------------------

    /// Attach `address` as the fallback layer consulted for unset components.
    pub fn set_address(&mut self, address: Arc<Address>) -> &mut Self {
        self.address = Some(address);
        self
    }

    /// Immediately overlay `address` onto the URL fields (forced mode).
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when the address's base path
    /// looks like a URL but fails to parse.
    pub fn apply_address(&mut self, address: &Address) -> CourierResult<&mut Self> {
        if let Some(base_path) = address.base_path.as_deref() {
            self.set_base_path_with(base_path, true)?;
        }
        if let Some(scheme) = address.scheme.as_deref() {
            self.set_scheme(scheme);
        }
        if let Some(host) = address.host.as_deref() {
            self.set_host(host);
        }
        if let Some(port) = address.port {
            if port >= 0 {
                self.set_port(port);
            }
        }
        Ok(self)
    }

    /// Fill unset components from the attached fallback address.
    ///
    /// The port is copied only when no port is set *and* the host was also
    /// empty before host-filling: an explicitly-hosted URL keeps its
    /// scheme-default port rather than inheriting the address's.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when the address's base path
    /// looks like a URL but fails to parse.
    pub fn merge_address(&mut self) -> CourierResult<&mut Self> {
        let Some(address) = self.address.clone() else {
            return Ok(self);
        };
        let origin_host = self.host.get();
        if non_empty(self.scheme.as_deref()).is_none() {
            if let Some(scheme) = address.scheme.clone() {
                self.scheme = Some(scheme);
                self.refresh_ssl();
            }
        }
        if non_empty(self.host.get().as_deref()).is_none() {
            if let Some(host) = address.host.clone() {
                self.host.set(host);
            }
        }
        if is_none_port(self.port.get()) && non_empty(origin_host.as_deref()).is_none() {
            if let Some(port) = address.port {
                self.port.set(port);
            }
        }
        if non_empty(self.user_info.as_deref()).is_none() {
            self.user_info.clone_from(&address.user_info);
        }
        if non_empty(self.base_path.get().as_deref()).is_none() {
            if let Some(base_path) = address.base_path.as_deref() {
                self.set_base_path_with(base_path, false)?;
            }
        }
        self.mark_stale();
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Composition
    // -----------------------------------------------------------------------

    /// Merge with `other`, preferring `self`'s fields; returns a new URL.
    ///
    /// Neither input is mutated.
    #[must_use]
    pub fn merge_url_with(&self, other: &Self) -> Self {
        let scheme = self.scheme.clone().or_else(|| other.scheme.clone());
        let user_info = self.user_info.clone().or_else(|| other.user_info.clone());
        let host = if self.host.is_null() {
            other.host.get()
        } else {
            self.host.get()
        };
        let port = if self.port.is_null() {
            other.port.get()
        } else {
            self.port.get()
        };
        let path = if self.path.is_null() {
            other.path.get()
        } else {
            self.path.get()
        };
        let fragment = self.fragment.clone().or_else(|| other.fragment.clone());
        Self::from_parts(scheme, user_info, host, port, path, fragment)
    }

    /// Overlay `base`'s address components onto the unset components of `self`.
    ///
    /// Components `base` itself lacks fall back to `http://localhost`. When
    /// the scheme or host had to come from `base`, `base`'s path acts as a
    /// base path: one trailing `/` is stripped and it is prepended to the
    /// current path.
    pub fn set_base_url(&mut self, base: &Self) -> &mut Self {
        let base_scheme = base.scheme.clone().unwrap_or_else(|| "http".to_owned());
        let base_user_info = base.user_info.clone();
        let base_host = base.host.get().unwrap_or_else(|| "localhost".to_owned());
        let base_port = base.port.get().filter(|p| *p >= 0).unwrap_or(-1);
        let base_path = base.path.get();

        let mut need_base_path = false;
        if self.scheme.is_none() {
            self.set_scheme(&base_scheme);
            need_base_path = true;
        }
        if self.user_info.is_none() {
            self.user_info = base_user_info;
        }
        if self.host.is_null() {
            self.host.set(base_host);
            need_base_path = true;
        }
        if is_none_port(self.port.get()) {
            self.port.set(base_port);
        }
        if let Some(path) = self.path.get() {
            if !path.trim().is_empty() && !path.starts_with('/') {
                self.path.set(format!("/{path}"));
            }
        }
        if need_base_path {
            if let Some(mut prefix) = base_path.filter(|p| !p.trim().is_empty()) {
                if prefix.ends_with('/') {
                    prefix.pop();
                }
                match self.path.get().filter(|p| !p.is_empty()) {
                    Some(path) => self.path.set(format!("{prefix}{path}")),
                    None => self.path.set(prefix),
                }
            }
        }
        self.mark_stale();
        self
    }

    // -----------------------------------------------------------------------
    // Call binding
    // -----------------------------------------------------------------------

    /// Bind the templated components to `call`'s resolved arguments.
    ///
    /// Used once per call, right before rendering, so placeholder expressions
    /// resolve against that call's actual argument values.
    pub fn bind_call(&mut self, call: &CallRef) -> &mut Self {
        self.host.bind_call(call);
        self.port.bind_call(call);
        self.base_path.bind_call(call);
        self.path.bind_call(call);
        self.mark_stale();
        self
    }

    /// Defer the host to a placeholder template.
    pub fn set_host_template(&mut self, template: UrlTemplate) -> &mut Self {
        self.host = RequestVar::from_template(template);
        self.mark_stale();
        self
    }

    /// Defer the port to a placeholder template.
    pub fn set_port_template(&mut self, template: UrlTemplate) -> &mut Self {
        self.port = RequestVar::from_template(template);
        self.mark_stale();
        self
    }

    /// Defer the base path to a placeholder template.
    pub fn set_base_path_template(&mut self, template: UrlTemplate) -> &mut Self {
        self.base_path = RequestVar::from_template(template);
        self.mark_stale();
        self
    }

    /// Defer the request path to a placeholder template.
    pub fn set_path_template(&mut self, template: UrlTemplate) -> &mut Self {
        self.path = RequestVar::from_template(template);
        self.mark_stale();
        self
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// The `[user_info@]host[:port]` segment, percent-encoded.
    ///
    /// The port is omitted when it is the default for the current scheme
    /// (80 without SSL, 443 with SSL).
    #[must_use]
    pub fn authority(&self) -> String {
        let mut out = String::new();
        if let Some(user_info) = non_empty(self.user_info.as_deref()) {
            out.push_str(&user_info_encode(user_info));
            out.push('@');
        }
        if let Some(host) = self.host.get().filter(|h| !h.is_empty()) {
            out.push_str(&user_info_encode(&host));
        }
        let port = self.port.get();
        if !is_none_port(port) {
            let port = port.unwrap_or(-1);
            let default_for_scheme = (port == 80 && !self.ssl) || (port == 443 && self.ssl);
            if !default_for_scheme {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }
        out
    }

    /// Render the URL from the current field state, bypassing the cache.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = non_empty(self.scheme.as_deref()) {
            out.push_str(scheme);
            out.push_str("://");
        }
        out.push_str(&self.authority());
        let has_host = self.host.get().is_some_and(|h| !h.is_empty());
        if let Some(base_path) = self.base_path.get().filter(|p| !p.is_empty()) {
            let encoded = path_encode(&base_path);
            if has_host && !encoded.starts_with('/') {
                out.push('/');
            }
            out.push_str(&encoded);
        }
        if let Some(path) = self.path.get().filter(|p| !p.is_empty()) {
            let encoded = path_encode(&path);
            if has_host && !encoded.starts_with('/') {
                out.push('/');
            }
            out.push_str(&encoded);
        }
        out
    }

    /// The rendered URL, recomputed only when a mutation occurred since the
    /// last call.
    pub fn generated_url(&mut self) -> &str {
        if matches!(self.rendered, RenderCache::Stale) {
            self.rendered = RenderCache::Cached(self.render());
        }
        let RenderCache::Cached(url) = &self.rendered else {
            unreachable!("rendering cached above")
        };
        url
    }

    /// The rendered URL with its `#fragment`, when one is set.
    pub fn full_url(&mut self) -> String {
        let rendered = self.generated_url().to_owned();
        match non_empty(self.fragment.as_deref()) {
            Some(fragment) => format!("{rendered}#{fragment}"),
            None => rendered,
        }
    }

    /// Convert the rendered URL into an [`http::Uri`] for the transport layer.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidUrl`] when the rendering is not a valid
    /// URI.
    pub fn to_uri(&mut self) -> CourierResult<Uri> {
        let rendered = self.generated_url();
        rendered
            .parse::<Uri>()
            .map_err(|e| CourierError::InvalidUrl(format!("{rendered}: {e}")))
    }

    /// Pre-dispatch safety net: fill a missing scheme or host.
    ///
    /// The correction is recoverable; a warning naming the original and the
    /// corrected rendering is logged and the request proceeds.
    pub fn check_and_complete(&mut self) -> &mut Self {
        let old_url = self.generated_url().to_owned();
        if non_empty(self.scheme.as_deref()).is_none() {
            let scheme = if self.ssl { "https" } else { "http" };
            self.set_scheme(scheme);
        }
        if non_empty(self.host.get().as_deref()).is_none() {
            self.set_host("localhost");
            if is_none_port(self.port.get()) {
                tracing::warn!(
                    original = %old_url,
                    corrected = %self.render(),
                    "invalid request url, a valid url must start with 'http://' or 'https://'; auto-corrected"
                );
            } else {
                tracing::warn!(
                    original = %old_url,
                    corrected = %self.render(),
                    "request url has an empty host; auto-corrected"
                );
            }
        }
        self
    }

    /// Shared routing handle for this URL's effective `host:port`.
    #[must_use]
    pub fn route(&self) -> Arc<Route> {
        Route::of(&self.host().unwrap_or_default(), self.port())
    }

    fn refresh_ssl(&mut self) {
        self.ssl = self.scheme.as_deref() == Some("https");
    }

    fn mark_stale(&mut self) {
        self.rendered = RenderCache::Stale;
    }
}

/// First candidate that is present and non-empty, in priority order.
fn first_non_empty(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
