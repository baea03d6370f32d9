//! Error handling for tile-batch
//!
//! Batch-level failures live in [`TileBatchError`]. Per-tile render failures are
//! not errors of the batch; they travel inside `RenderOutcome::Failure` instead.

mod helpers;
mod types;

pub use types::{Result, TileBatchError};
