//! # tile-batch
//!
//! Batch client for a remote tile render service. A batch of tile files is sent
//! to the service concurrently, one request per file; each settlement is
//! reported on its own, and the rendered images are collected into a zip
//! package for download.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tile_batch::{BatchOrchestrator, RenderClient, RenderOptions, TileFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(RenderClient::new("http://127.0.0.1:8080")?);
//!     let orchestrator = BatchOrchestrator::new(client);
//!
//!     let files = vec![TileFile::from_path("tiles/5,-3.zip").await?];
//!     let mut session = orchestrator.submit(files, &RenderOptions::new().with_light("full"));
//!
//!     while let Some(outcome) = session.next_outcome().await {
//!         println!("{} settled, success = {}", outcome.identity(), outcome.is_success());
//!     }
//!
//!     let package = session.finalize().await?;
//!     package.save_to(".").await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod display;
pub mod utils;

pub use config::Config;
pub use crate::core::archive::{Archive, DEFAULT_PACKAGE_NAME, Package};
pub use crate::core::batch::{BatchOrchestrator, BatchSession, BatchSummary, OutcomeSink};
pub use crate::core::client::{
    RenderBackend, RenderClient, RenderError, RenderOptions, RenderOutcome, TileFile,
};
pub use crate::core::identity::Identity;
pub use display::{DisplayEntry, DisplayGrid, Viewport, thumbnail_edge};
pub use utils::error::{Result, TileBatchError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Version string shown by `tile-batch --version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Short hash of the commit the crate was built from
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            git_hash: env!("GIT_HASH"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
