//! Lazily-resolved URL component variables.

use std::sync::Arc;

use courier_core::args::CallRef;
use courier_core::template::UrlTemplate;

/// Conversion from expanded template text into a component value.
pub trait FromArgValue: Sized {
    /// Convert the expanded text; `None` if it does not parse.
    fn from_arg_value(value: &str) -> Option<Self>;

    /// Whether a resolved value counts as empty.
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl FromArgValue for String {
    fn from_arg_value(value: &str) -> Option<Self> {
        Some(value.to_owned())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl FromArgValue for i32 {
    fn from_arg_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

/// A URL component that is either set statically or resolved against a
/// specific call's arguments.
///
/// Reads of a bound variable re-evaluate its template on every call; nothing
/// is cached, so re-binding to another call yields that call's values.
#[derive(Debug, Clone, Default)]
pub enum RequestVar<T> {
    /// No value.
    #[default]
    Unset,
    /// A fixed value.
    Static(T),
    /// Template known, waiting for a call to bind against.
    Deferred(UrlTemplate),
    /// Template evaluated against the bound call's arguments on every read.
    Bound {
        /// The in-flight call whose arguments resolve the template.
        call: CallRef,
        /// The component's placeholder template.
        template: UrlTemplate,
    },
}

impl<T: FromArgValue + Clone> RequestVar<T> {
    /// Variable holding a fixed value.
    #[must_use]
    pub fn from_value(value: T) -> Self {
        Self::Static(value)
    }

    /// Variable deferred until a call is bound.
    #[must_use]
    pub fn from_template(template: UrlTemplate) -> Self {
        Self::Deferred(template)
    }

    /// Overwrite with a fixed value, discarding any template.
    pub fn set(&mut self, value: T) {
        *self = Self::Static(value);
    }

    /// Resolve the current value.
    ///
    /// An unset or not-yet-bound variable reads as `None`; a bound variable
    /// expands its template against the call's arguments.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        match self {
            Self::Unset | Self::Deferred(_) => None,
            Self::Static(value) => Some(value.clone()),
            Self::Bound { call, template } => template
                .expand(call.as_ref())
                .and_then(|text| T::from_arg_value(&text)),
        }
    }

    /// Bind the variable's template to `call`.
    ///
    /// A deferred variable becomes bound, an already-bound variable is
    /// re-targeted, and a static or unset variable is left untouched (there
    /// is no template to evaluate).
    pub fn bind_call(&mut self, call: &CallRef) {
        if let Self::Deferred(template) | Self::Bound { template, .. } = self {
            let template = std::mem::take(template);
            *self = Self::Bound {
                call: Arc::clone(call),
                template,
            };
        }
    }

    /// Whether the variable resolves to nothing (or to an empty value).
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self.get() {
            None => true,
            Some(value) => value.is_empty_value(),
        }
    }
}
