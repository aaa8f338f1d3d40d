//! Feed reader URL service.
//!
//! Normalizes user supplied feed URLs, decodes request data sent by the web
//! frontend, and serves both (plus the PWA manifest) over HTTP.

pub mod api;
pub mod request_parser;
pub mod url_parser;
pub mod utils;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use url_parser::{normalize_url, normalize_url_detailed, Normalized};
