//! Concurrent batch rendering
//!
//! [`BatchOrchestrator::submit`] starts one task per tile and hands back a
//! [`BatchSession`]. The session yields outcomes as they settle, in whatever
//! order that happens, and collects successful renders into its own archive.

mod orchestrator;
mod session;


pub use orchestrator::BatchOrchestrator;
pub use session::{BatchSession, BatchSummary, OutcomeSink};
