//! Core batch rendering functionality

pub mod archive;
pub mod batch;
pub mod client;
pub mod identity;
