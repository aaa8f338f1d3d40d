use anyhow::{bail, Context, Result};
use tracing::{error, warn};
use url::Url;

use super::normalizer::has_http_scheme;

/// Longest URL, in bytes, accepted as a fetch target
pub const MAX_URL_LENGTH: usize = 2048;

/// Checks that a (normalized) URL is usable as a fetch target
///
/// The normalizer never fails and may hand back a best-effort string; callers
/// that are about to fetch use this to reject what the parser would not accept.
///
/// # Arguments
/// * `url` - The URL string to validate
///
/// # Returns
/// * `Result<Url>` - The parsed URL, or why it cannot be fetched
pub fn validate_fetch_target(url: &str) -> Result<Url> {
    if url.is_empty() {
        error!("Received empty URL");
        bail!("URL cannot be empty");
    }

    if url.len() > MAX_URL_LENGTH {
        error!("URL exceeds maximum length: {} > {}", url.len(), MAX_URL_LENGTH);
        bail!("URL exceeds maximum length of {} characters", MAX_URL_LENGTH);
    }

    if !has_http_scheme(url) {
        error!("URL lacks proper protocol: {}", url);
        bail!("URL must start with http:// or https://");
    }

    let parsed = Url::parse(url).with_context(|| format!("Failed to parse URL '{}'", url))?;

    if parsed.host_str().map_or(true, str::is_empty) {
        error!("URL has no host: {}", url);
        bail!("URL must contain a host");
    }

    Ok(parsed)
}

/// Extracts the host from a parsed URL, dropping a leading `www.`
pub fn extract_host(parsed_url: &Url) -> String {
    match parsed_url.host_str() {
        Some(host) => host.trim_start_matches("www.").to_string(),
        None => {
            warn!("URL has no host component");
            String::new()
        }
    }
}
