//! Configuration loading for the recipe tools.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! Default config file location is `~/.config/vdb-recipes/config.toml`.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::DemoError;

/// Environment variable carrying the OpenAI key forwarded to the service's
/// vectorizer and generative modules.
pub const OPENAI_KEY_ENV: &str = "OPENAI_APIKEY";

/// Host of the public read-only demo instance.
pub const READONLY_DEMO_HOST: &str = "edu-demo.weaviate.network";

/// API key of the public read-only demo instance.
pub const READONLY_DEMO_API_KEY: &str = "readonly-demo";

/// Connection and import settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Service host with optional port, e.g. `localhost:8080`
    #[serde(default = "default_host")]
    pub host: String,

    /// `http` or `https`
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Service API key, sent as a bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Forwarded as `X-OpenAI-Api-Key`
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Objects per batch request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "localhost:8080".to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            scheme: default_scheme(),
            api_key: None,
            openai_api_key: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/vdb-recipes/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (WEAVIATE_*, plus OPENAI_APIKEY)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, DemoError> {
        let config_dir = ProjectDirs::from("", "", "vdb-recipes")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("host", default_host())
            .map_err(|e| DemoError::Config(e.to_string()))?
            .set_default("scheme", default_scheme())
            .map_err(|e| DemoError::Config(e.to_string()))?
            .set_default("batch_size", default_batch_size() as i64)
            .map_err(|e| DemoError::Config(e.to_string()))?
            .set_default("timeout_secs", default_timeout_secs() as i64)
            .map_err(|e| DemoError::Config(e.to_string()))?
            .set_default("max_retries", default_max_retries() as i64)
            .map_err(|e| DemoError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| DemoError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // WEAVIATE_HOST, WEAVIATE_API_KEY, WEAVIATE_BATCH_SIZE, ...
        // Nested keys would use a double underscore.
        builder = builder.add_source(
            Environment::with_prefix("WEAVIATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| DemoError::Config(e.to_string()))?;

        let mut settings: Settings = config
            .try_deserialize()
            .map_err(|e| DemoError::Config(e.to_string()))?;

        if settings.openai_api_key.is_none() {
            settings.openai_api_key = std::env::var(OPENAI_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty());
        }

        Ok(settings)
    }

    /// Point the settings at the public read-only demo instance.
    pub fn use_readonly_demo(&mut self) {
        self.host = READONLY_DEMO_HOST.to_string();
        self.scheme = "https".to_string();
        self.api_key = Some(READONLY_DEMO_API_KEY.to_string());
    }

    /// Settings for the public read-only demo instance.
    pub fn readonly_demo() -> Self {
        let mut settings = Self::default();
        settings.use_readonly_demo();
        settings
    }

    /// Base URL of the REST API, e.g. `http://localhost:8080/v1`.
    pub fn base_url(&self) -> String {
        format!("{}://{}/v1", self.scheme, self.host.trim_end_matches('/'))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), DemoError> {
        if self.host.trim().is_empty() {
            return Err(DemoError::Config("host must not be empty".to_string()));
        }
        if self.scheme != "http" && self.scheme != "https" {
            return Err(DemoError::Config(format!(
                "scheme must be http or https, got {}",
                self.scheme
            )));
        }
        if self.batch_size == 0 {
            return Err(DemoError::Config("batch_size must be > 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(DemoError::Config("timeout_secs must be > 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(DemoError::Config("max_retries must be > 0".to_string()));
        }
        Ok(())
    }
}
