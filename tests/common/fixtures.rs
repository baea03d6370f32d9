//! Test fixtures and data factories

use std::io::{Cursor, Read};
use tile_batch::{Package, TileFile};
use zip::ZipArchive;

/// Factory for tile files
pub struct TileFactory;

impl TileFactory {
    /// A coordinate tile with placeholder contents
    pub fn coordinate(x: i64, z: i64) -> TileFile {
        TileFile::new(format!("{},{}.zip", x, z), format!("tile {} {}", x, z).into_bytes())
    }

    /// A file with an arbitrary name
    pub fn named(name: &str) -> TileFile {
        TileFile::new(name, format!("file {}", name).into_bytes())
    }

    /// A row of coordinate tiles along x
    pub fn row(z: i64, xs: std::ops::Range<i64>) -> Vec<TileFile> {
        xs.map(|x| Self::coordinate(x, z)).collect()
    }
}

/// Read every entry of a package as `(name, bytes)` in stored order
pub fn package_entries(package: &Package) -> Vec<(String, Vec<u8>)> {
    let mut zip = ZipArchive::new(Cursor::new(package.data.to_vec()))
        .expect("package is not a valid zip");
    (0..zip.len())
        .map(|i| {
            let mut file = zip.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            (file.name().to_string(), data)
        })
        .collect()
}
