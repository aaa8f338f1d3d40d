//! Feed URL normalization and validation.
//!
//! [`normalize_url`] turns whatever a user typed into an absolute http(s)
//! URL string without ever failing. [`validate_fetch_target`] is the strict
//! counterpart for callers that are about to fetch the result.

pub mod normalizer;
pub mod url_validator;

#[cfg(test)]
mod tests;

pub use normalizer::{normalize_url, normalize_url_detailed, Normalized};
pub use url_validator::{extract_host, validate_fetch_target, MAX_URL_LENGTH};
