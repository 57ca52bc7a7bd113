//! Host/port routing handles for the transport layer.
//!
//! Connection pools key on `host:port`; every rendered URL maps to exactly
//! one shared [`Route`] handle, created on first use and reused for the
//! lifetime of the process.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

static ROUTES: LazyLock<DashMap<(String, i32), Arc<Route>>> = LazyLock::new(DashMap::new);

/// A `host:port` routing key shared by every request targeting that origin.
#[derive(Debug)]
pub struct Route {
    host: String,
    port: i32,
    request_count: AtomicU64,
}

impl Route {
    /// Shared handle for `host:port`, created on first use.
    #[must_use]
    pub fn of(host: &str, port: i32) -> Arc<Self> {
        ROUTES
            .entry((host.to_owned(), port))
            .or_insert_with(|| {
                Arc::new(Self {
                    host: host.to_owned(),
                    port,
                    request_count: AtomicU64::new(0),
                })
            })
            .clone()
    }

    /// Host this route targets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port this route targets.
    #[must_use]
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Record one request dispatched through this route.
    pub fn mark_request(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of requests dispatched through this route so far.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }
}
