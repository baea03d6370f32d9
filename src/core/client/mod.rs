//! Render request client
//!
//! Sends one tile to the render service and reports exactly one
//! [`RenderOutcome`] for it. Every failure, whether transport or HTTP, becomes
//! a tagged outcome rather than an error, so one bad tile never affects another.

mod types;


pub use types::{RenderError, RenderOptions, RenderOutcome, TileFile};

use crate::config::Config;
use crate::core::identity::Identity;
use crate::utils::error::{Result, TileBatchError};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};
use url::Url;

/// Path of the render endpoint, relative to the service base URL
pub const RENDER_PATH: &str = "render";

/// Multipart field the render service reads the tile from
pub const TILE_FIELD: &str = "tile";

/// Anything that can turn a tile file into a render outcome
#[async_trait]
pub trait RenderBackend: Send + Sync {
    /// Render one tile. Resolves exactly once and never errors.
    async fn render(&self, file: TileFile, options: &RenderOptions) -> RenderOutcome;
}

/// HTTP client for the render service
#[derive(Debug, Clone)]
pub struct RenderClient {
    http: reqwest::Client,
    render_url: Url,
}

impl RenderClient {
    /// Create a client for the service at `endpoint` with default settings
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(endpoint: &str, http: reqwest::Client) -> Result<Self> {
        let mut base = Url::parse(endpoint)?;
        // Without a trailing slash, join would replace the last path segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let render_url = base.join(RENDER_PATH)?;
        Ok(Self { http, render_url })
    }

    /// Create a client from configuration.
    ///
    /// No request timeout is set; the transport default applies.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TileBatchError::HttpClient)?;
        Self::with_client(&config.endpoint, http)
    }

    pub fn render_url(&self) -> &Url {
        &self.render_url
    }

    /// Full request URL; the query string is only present when options are set
    pub fn request_url(&self, options: &RenderOptions) -> Url {
        let mut url = self.render_url.clone();
        let pairs = options.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn form(file: TileFile) -> Form {
        let part = Part::bytes(file.data).file_name(file.name);
        Form::new().part(TILE_FIELD, part)
    }
}

#[async_trait]
impl RenderBackend for RenderClient {
    async fn render(&self, file: TileFile, options: &RenderOptions) -> RenderOutcome {
        let identity = Identity::from_filename(&file.name);
        let url = self.request_url(options);
        debug!(tile = %identity, %url, bytes = file.data.len(), "Sending render request");

        let response = match self.http.post(url).multipart(Self::form(file)).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(tile = %identity, error = %e, "Render request failed");
                return RenderOutcome::failure(identity, RenderError::Network(e.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            match response.bytes().await {
                Ok(blob) => {
                    debug!(tile = %identity, bytes = blob.len(), "Render succeeded");
                    RenderOutcome::success(identity, blob)
                }
                Err(e) => {
                    warn!(tile = %identity, error = %e, "Failed to read render response");
                    RenderOutcome::failure(identity, RenderError::Network(e.to_string()))
                }
            }
        } else {
            let message = response.text().await.unwrap_or_default();
            warn!(tile = %identity, status = status.as_u16(), %message, "Render rejected");
            RenderOutcome::failure(
                identity,
                RenderError::Http {
                    status: status.as_u16(),
                    message,
                },
            )
        }
    }
}
