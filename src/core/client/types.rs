//! Render request and outcome types

use crate::core::identity::Identity;
use crate::utils::error::{Result, TileBatchError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Options forwarded to the render endpoint as query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Environment light setting, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_light(mut self, light: impl Into<String>) -> Self {
        self.light = Some(light.into());
        self
    }

    /// Query parameters in the order they are appended to the URL
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(light) = &self.light {
            pairs.push(("light", light.as_str()));
        }
        pairs
    }
}

/// One tile file submitted in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFile {
    /// Bare file name, used for identity and as the multipart filename
    pub name: String,
    /// Raw file contents
    pub data: Vec<u8>,
}

impl TileFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read a tile from disk, naming it after the last path component
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                TileBatchError::invalid_input(format!("Not a file path: {}", path.display()))
            })?;
        let data = tokio::fs::read(path).await?;
        Ok(Self { name, data })
    }

    pub fn identity(&self) -> Identity {
        Identity::from_filename(&self.name)
    }
}

/// Why a single render request did not produce an image
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The request never got an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with something other than 200
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
}

impl RenderError {
    /// HTTP status, or 0 when no response was received
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Network(_) => 0,
            Self::Http { status, .. } => *status,
        }
    }

    /// Response text, empty when no response was received
    pub fn message(&self) -> &str {
        match self {
            Self::Network(_) => "",
            Self::Http { message, .. } => message,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Settlement of one render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Rendered image bytes
    Success { identity: Identity, blob: Bytes },
    /// Failed request, tagged with the tile it belonged to
    Failure { identity: Identity, error: RenderError },
}

impl RenderOutcome {
    pub fn success(identity: Identity, blob: impl Into<Bytes>) -> Self {
        Self::Success {
            identity,
            blob: blob.into(),
        }
    }

    pub fn failure(identity: Identity, error: RenderError) -> Self {
        Self::Failure { identity, error }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            Self::Success { identity, .. } | Self::Failure { identity, .. } => identity,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn blob(&self) -> Option<&Bytes> {
        match self {
            Self::Success { blob, .. } => Some(blob),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&RenderError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
