//! Shared foundation for Courier clients.
//!
//! This crate provides the building blocks the URL layer composes over:
//! error types, environment-driven configuration, and the boundary types
//! through which the (out-of-tree) annotation and argument-binding layers
//! hand over URL templates and resolved call arguments.

pub mod args;
pub mod config;
pub mod error;
pub mod template;

pub use args::{ArgumentSource, CallRef, ResolvedCall};
pub use config::CourierConfig;
pub use error::{CourierError, CourierResult};
pub use template::{TemplateSegment, UrlTemplate};
