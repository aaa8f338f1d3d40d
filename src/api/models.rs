use serde::{Deserialize, Serialize};

/// Response for a normalize request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizeResponse {
    /// The `url` value as received
    pub input: String,

    /// Normalized URL; empty when the input was blank
    pub normalized: String,

    /// Whether the URL parser accepted the input (false for blank and fallback results)
    pub canonical: bool,
}

/// Health status response for the /health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator, always "healthy" while the server answers
    pub status: String,

    /// Seconds since the server started
    pub uptime_secs: u64,

    /// Crate version
    pub version: String,
}

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status indicator: error
    pub status: String,

    /// Error message details
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

/// Icon entry of the web app manifest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Web app manifest that makes the reader installable as a PWA
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub scope: String,
    /// One of "fullscreen", "standalone", "minimal-ui", "browser"
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

impl Default for WebManifest {
    fn default() -> Self {
        Self {
            name: "Feed Reader".to_string(),
            short_name: "Feeds".to_string(),
            description: "Read your RSS and Atom feeds".to_string(),
            start_url: "/".to_string(),
            scope: "/".to_string(),
            display: "standalone".to_string(),
            background_color: "#ffffff".to_string(),
            theme_color: "#ffffff".to_string(),
            icons: vec![
                ManifestIcon {
                    src: "/pwa-192x192.png".to_string(),
                    sizes: "192x192".to_string(),
                    mime_type: "image/png".to_string(),
                },
                ManifestIcon {
                    src: "/pwa-512x512.png".to_string(),
                    sizes: "512x512".to_string(),
                    mime_type: "image/png".to_string(),
                },
            ],
        }
    }
}
