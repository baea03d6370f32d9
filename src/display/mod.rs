//! Presentation of batch results
//!
//! Consumes the settlement stream of a batch and turns each outcome into a grid
//! entry. Nothing here affects orchestration or the archive.

mod grid;


pub use grid::{
    DisplayEntry, DisplayGrid, MIN_THUMBNAIL_EDGE, THUMBNAIL_EDGES, Viewport, thumbnail_edge,
};
