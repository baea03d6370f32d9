//! Configuration for tile-batch
//!
//! Settings come from a YAML file or from `TILE_BATCH_*` environment variables
//! (a `.env` file is honoured), and can be overridden from the command line.

pub mod validation;

pub use validation::Validate;

use crate::core::archive::DEFAULT_PACKAGE_NAME;
use crate::core::client::RenderOptions;
use crate::display::Viewport;
use crate::utils::error::{Result, TileBatchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const ENV_ENDPOINT: &str = "TILE_BATCH_ENDPOINT";
pub const ENV_LIGHT: &str = "TILE_BATCH_LIGHT";
pub const ENV_PACKAGE_NAME: &str = "TILE_BATCH_PACKAGE_NAME";
pub const ENV_VIEWPORT: &str = "TILE_BATCH_VIEWPORT";
pub const ENV_USER_AGENT: &str = "TILE_BATCH_USER_AGENT";

/// Default render service base URL
pub fn default_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}

pub fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

pub fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the render service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Options sent with every render request
    #[serde(default)]
    pub render: RenderOptions,
    /// File name of the downloadable package
    #[serde(default = "default_package_name")]
    pub package_name: String,
    /// Viewport used to size thumbnails
    #[serde(default)]
    pub viewport: Viewport,
    /// User-Agent header sent to the render service
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            render: RenderOptions::default(),
            package_name: default_package_name(),
            viewport: Viewport::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TileBatchError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)?;

        config.check()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        info!("Loading configuration from environment variables");
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(light) = lookup(ENV_LIGHT) {
            config.render.light = Some(light);
        }
        if let Some(name) = lookup(ENV_PACKAGE_NAME) {
            config.package_name = name;
        }
        if let Some(viewport) = lookup(ENV_VIEWPORT) {
            config.viewport = viewport.parse()?;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = user_agent;
        }

        config.check()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(TileBatchError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
