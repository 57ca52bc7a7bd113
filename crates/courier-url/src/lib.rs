//! Request-URL composition for Courier clients.
//!
//! Every outbound request carries one [`RequestUrl`], assembled from up to
//! three layers resolved in precedence order:
//!
//! ```text
//! explicit fields          set_scheme / set_host / set_port / ...
//!        |
//!        v
//! call-bound templates     RequestVar resolved against one call's arguments
//!        |
//!        v
//! fallback Address         configured scheme/host/port/base-path/user-info
//!        |
//!        v
//! hard defaults            http or https, 80 or 443, localhost safety net
//! ```
//!
//! The rendered string is cached and invalidated on every mutation; the
//! transport layer consumes the rendering plus the queryable host/port
//! ([`Route`]) and SSL flag.

pub mod address;
pub mod encode;
pub mod parse;
pub mod route;
pub mod url;
pub mod variable;

pub use address::Address;
pub use route::Route;
pub use url::{RequestUrl, is_none_port, normalize_port};
pub use variable::{FromArgValue, RequestVar};
