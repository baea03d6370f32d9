//! Thumbnail grid model

use crate::core::batch::OutcomeSink;
use crate::core::client::RenderOutcome;
use crate::utils::error::TileBatchError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candidate thumbnail edges, largest first
pub const THUMBNAIL_EDGES: [u32; 2] = [256, 128];

/// Edge used when no larger candidate fits
pub const MIN_THUMBNAIL_EDGE: u32 = 64;

/// Visible area the grid is laid out in, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// How many square cells of `edge` pixels fit without overflow
    pub fn capacity(&self, edge: u32) -> u64 {
        u64::from(self.width / edge) * u64::from(self.height / edge)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Viewport {
    type Err = TileBatchError;

    /// Parses `"<width>x<height>"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            TileBatchError::invalid_input(format!(
                "Invalid viewport '{}', expected WIDTHxHEIGHT",
                s
            ))
        };
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

/// Largest thumbnail edge at which `tiles` thumbnails fit in `viewport`.
///
/// Tries 256 then 128; anything that fits neither gets 64, even if 64 does not
/// fit either.
pub fn thumbnail_edge(viewport: Viewport, tiles: usize) -> u32 {
    THUMBNAIL_EDGES
        .into_iter()
        .find(|&edge| viewport.capacity(edge) >= tiles as u64)
        .unwrap_or(MIN_THUMBNAIL_EDGE)
}

/// One cell in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    /// Rendered tile image
    Thumbnail { label: String, image: Bytes, edge: u32 },
    /// Failed tile
    Placeholder {
        label: String,
        status: u16,
        message: String,
        edge: u32,
    },
}

impl DisplayEntry {
    pub fn from_outcome(outcome: &RenderOutcome, edge: u32) -> Self {
        let label = outcome.identity().to_string();
        match outcome {
            RenderOutcome::Success { blob, .. } => Self::Thumbnail {
                label,
                image: blob.clone(),
                edge,
            },
            RenderOutcome::Failure { error, .. } => Self::Placeholder {
                label,
                status: error.status_code(),
                message: error.message().to_string(),
                edge,
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Thumbnail { label, .. } | Self::Placeholder { label, .. } => label,
        }
    }

    pub fn edge(&self) -> u32 {
        match self {
            Self::Thumbnail { edge, .. } | Self::Placeholder { edge, .. } => *edge,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    /// Text shown for the cell: the label, plus status and message for failures
    pub fn caption(&self) -> String {
        match self {
            Self::Thumbnail { label, .. } => label.clone(),
            Self::Placeholder {
                label,
                status,
                message,
                ..
            } if message.is_empty() => format!("{} {}", label, status),
            Self::Placeholder {
                label,
                status,
                message,
                ..
            } => format!("{} {} {}", label, status, message),
        }
    }
}

/// Grid of entries for one batch, in settlement order
#[derive(Debug, Clone)]
pub struct DisplayGrid {
    edge: u32,
    dispatched: usize,
    entries: Vec<DisplayEntry>,
}

impl DisplayGrid {
    /// Lay out a grid for a batch of `dispatched` tiles
    pub fn for_batch(viewport: Viewport, dispatched: usize) -> Self {
        Self {
            edge: thumbnail_edge(viewport, dispatched),
            dispatched,
            entries: Vec::with_capacity(dispatched),
        }
    }

    pub fn edge(&self) -> u32 {
        self.edge
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn push(&mut self, outcome: &RenderOutcome) -> &DisplayEntry {
        self.entries.push(DisplayEntry::from_outcome(outcome, self.edge));
        &self.entries[self.entries.len() - 1]
    }

    /// All dispatched tiles have an entry
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.dispatched
    }

    pub fn placeholders(&self) -> usize {
        self.entries.iter().filter(|e| e.is_placeholder()).count()
    }
}

impl OutcomeSink for DisplayGrid {
    fn accept(&mut self, outcome: &RenderOutcome) {
        self.push(outcome);
    }
}
