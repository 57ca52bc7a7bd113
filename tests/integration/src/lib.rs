//! Integration tests for the Courier URL layer.
//!
//! These exercise the public API end to end: precedence resolution, render
//! caching, call binding, and URL composition.

use std::collections::HashMap;
use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use courier_core::ArgumentSource;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Argument source that counts lookups — the probe behind the cache-law tests.
///
/// Every template expansion queries the source, so a stable lookup count
/// between two reads proves no re-rendering happened in between.
#[derive(Debug, Default)]
pub struct CountingSource {
    named: HashMap<String, String>,
    lookups: AtomicU64,
}

impl CountingSource {
    /// Create an empty counting source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named argument value.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Number of lookups served so far.
    #[must_use]
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl ArgumentSource for CountingSource {
    fn value_of(&self, name: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.named.get(name).cloned()
    }

    fn value_at(&self, _index: usize) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        None
    }
}

mod test_binding;
mod test_compose;
