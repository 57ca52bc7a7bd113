//! Pre-parsed URL templates with call-argument placeholders.
//!
//! The annotation layer hands URL components over as templates rather than
//! finished strings; a `{name}` or `{2}` placeholder is resolved against the
//! bound call's arguments at read time. Expansion is a pure function of the
//! argument values.

use crate::args::ArgumentSource;

/// One piece of a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    /// Verbatim text.
    Literal(String),
    /// A `{name}` placeholder resolved by argument name.
    Named(String),
    /// A `{2}` placeholder resolved by argument position.
    Indexed(usize),
}

/// A parsed placeholder template for one URL component.
///
/// # Examples
///
/// ```
/// use courier_core::{ResolvedCall, UrlTemplate};
///
/// let template = UrlTemplate::parse("/users/{id}/posts");
/// let call = ResolvedCall::new().with_arg("id", "42");
/// assert_eq!(template.expand(&call).as_deref(), Some("/users/42/posts"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlTemplate {
    segments: Vec<TemplateSegment>,
}

impl UrlTemplate {
    /// Build a template from already-split segments.
    #[must_use]
    pub fn new(segments: Vec<TemplateSegment>) -> Self {
        Self { segments }
    }

    /// Parse `{name}` / `{index}` placeholder syntax.
    ///
    /// An unterminated `{` is kept as literal text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = raw;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            if open > 0 {
                segments.push(TemplateSegment::Literal(rest[..open].to_owned()));
            }
            let inner = &rest[open + 1..open + close];
            let segment = match inner.parse::<usize>() {
                Ok(index) => TemplateSegment::Indexed(index),
                Err(_) => TemplateSegment::Named(inner.to_owned()),
            };
            segments.push(segment);
            rest = &rest[open + close + 1..];
        }
        if !rest.is_empty() {
            segments.push(TemplateSegment::Literal(rest.to_owned()));
        }
        Self { segments }
    }

    /// Whether the template contains no placeholders.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, TemplateSegment::Literal(_)))
    }

    /// Expand the template against a call's arguments.
    ///
    /// Returns `None` when any placeholder has no value in `args`.
    #[must_use]
    pub fn expand(&self, args: &dyn ArgumentSource) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Named(name) => out.push_str(&args.value_of(name)?),
                TemplateSegment::Indexed(index) => out.push_str(&args.value_at(*index)?),
            }
        }
        Some(out)
    }
}
