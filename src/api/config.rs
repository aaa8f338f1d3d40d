use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::api::models::WebManifest;
use crate::request_parser::DEFAULT_QUERY_PARAM;

/// Prefix of environment variables overriding configuration, e.g. `FEED_READER_PORT`
pub const ENV_PREFIX: &str = "FEED_READER";

/// Configuration for the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Query parameter carrying base64url request data on GET
    pub query_param: String,

    /// Timeout for reading a client request, in seconds
    pub request_timeout_secs: u64,

    /// Directory for log files (logs go to stderr if None)
    pub log_dir: Option<String>,

    /// Manifest served at /manifest.webmanifest
    pub manifest: WebManifest,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            query_param: DEFAULT_QUERY_PARAM.to_string(),
            request_timeout_secs: 30,
            log_dir: None,
            manifest: WebManifest::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from defaults, an optional file, then the environment
    ///
    /// # Arguments
    /// * `path` - Optional config file; its format is taken from the extension
    ///
    /// # Returns
    /// * `Result<ApiConfig>` - The merged configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        Self::build(builder.add_source(environment()))
            .with_context(|| match path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })
    }

    /// Parses configuration from TOML text, without consulting the environment
    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
            .context("Failed to parse TOML configuration")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?;
        Ok(settings.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
