//! The resolved-call boundary.
//!
//! URL templates are expanded against the arguments of one specific in-flight
//! call. The binder that resolves method arguments into those values lives
//! outside this crate; it hands them over through [`ArgumentSource`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup of resolved call-argument values by placeholder name or position.
///
/// Implementations must return the value as it stands at read time; bound
/// URL variables re-query on every read and never cache the result.
pub trait ArgumentSource: fmt::Debug + Send + Sync {
    /// Value of the named argument, if the call provided one.
    fn value_of(&self, name: &str) -> Option<String>;

    /// Value of the positional argument, if the call provided one.
    fn value_at(&self, index: usize) -> Option<String>;
}

/// Shared handle to one call's resolved arguments.
pub type CallRef = Arc<dyn ArgumentSource>;

/// An immutable bag of resolved arguments for one outbound call.
///
/// # Examples
///
/// ```
/// use courier_core::{ArgumentSource, ResolvedCall};
///
/// let call = ResolvedCall::new()
///     .with_arg("user", "alice")
///     .with_positional("42");
/// assert_eq!(call.value_of("user").as_deref(), Some("alice"));
/// assert_eq!(call.value_at(0).as_deref(), Some("42"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ResolvedCall {
    named: HashMap<String, String>,
    positional: Vec<String>,
}

impl ResolvedCall {
    /// Create an empty argument bag.
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

    /// Append a positional argument value.
    #[must_use]
    pub fn with_positional(mut self, value: impl Into<String>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Finish construction and wrap into a shared [`CallRef`].
    #[must_use]
    pub fn into_call(self) -> CallRef {
        Arc::new(self)
    }
}

impl ArgumentSource for ResolvedCall {
    fn value_of(&self, name: &str) -> Option<String> {
        self.named.get(name).cloned()
    }

    fn value_at(&self, index: usize) -> Option<String> {
        self.positional.get(index).cloned()
    }
}
