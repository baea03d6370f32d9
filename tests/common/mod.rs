//! Common test utilities for tile-batch

pub mod fixtures;
pub mod render_service;

pub use fixtures::{TileFactory, package_entries};
pub use render_service::MockRenderService;
