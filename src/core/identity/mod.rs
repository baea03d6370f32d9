//! Tile identity extraction
//!
//! A tile file named `<x>,<z>.zip` is identified by its coordinate pair; any
//! other name is kept verbatim as an opaque identity. The same stringified form
//! labels the tile on screen and names its entry in the download archive.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;


// Captures are kept as text: "-0" and "007" survive untouched.
// Anchored to the whole name, so "tile_5,3.zip" stays opaque.
static COORDINATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?[0-9]+),(-?[0-9]+)\.zip$").expect("Invalid coordinate regex"));

/// Extension given to rendered coordinate tiles
pub const RENDERED_EXTENSION: &str = "png";

/// Identity of one tile in a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Region coordinates captured from a `<x>,<z>.zip` filename
    Coordinate { x: String, z: String },
    /// Any other filename, unchanged
    Opaque(String),
}

impl Identity {
    /// Derive the identity of a tile from its filename.
    ///
    /// Never fails: a name that does not look like `<x>,<z>.zip` becomes
    /// [`Identity::Opaque`].
    pub fn from_filename(filename: &str) -> Self {
        match COORDINATE_PATTERN.captures(filename) {
            Some(caps) => Self::Coordinate {
                x: caps[1].to_string(),
                z: caps[2].to_string(),
            },
            None => Self::Opaque(filename.to_string()),
        }
    }

    pub fn coordinate(x: impl Into<String>, z: impl Into<String>) -> Self {
        Self::Coordinate {
            x: x.into(),
            z: z.into(),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque(name.into())
    }

    pub fn is_coordinate(&self) -> bool {
        matches!(self, Self::Coordinate { .. })
    }

    /// Name of this tile's entry in the download archive.
    ///
    /// Identical to the display label.
    pub fn entry_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinate { x, z } => write!(f, "{},{}.{}", x, z, RENDERED_EXTENSION),
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Identity {
    fn from(filename: &str) -> Self {
        Self::from_filename(filename)
    }
}
