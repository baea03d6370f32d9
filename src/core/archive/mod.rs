//! Archive aggregation for bulk download
//!
//! Successful renders are accumulated under their identity's entry name and
//! packed into a single zip on demand.


use crate::core::identity::Identity;
use crate::utils::error::{Result, TileBatchError};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// File name of the downloadable package unless configured otherwise
pub const DEFAULT_PACKAGE_NAME: &str = "test.zip";

/// Longest entry name a zip package can hold, in bytes
pub const MAX_ENTRY_NAME_LEN: usize = u16::MAX as usize;

/// Successful render outputs keyed by entry name
#[derive(Debug, Clone)]
pub struct Archive {
    package_name: String,
    entries: BTreeMap<String, Bytes>,
}

impl Default for Archive {
    fn default() -> Self {
        Self::new()
    }
}

impl Archive {
    pub fn new() -> Self {
        Self::with_package_name(DEFAULT_PACKAGE_NAME)
    }

    pub fn with_package_name(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Insert the rendered image for `identity`, replacing any earlier entry
    /// with the same name.
    pub fn add(&mut self, identity: &Identity, blob: Bytes) {
        self.entries.insert(identity.entry_name(), blob);
    }

    pub fn remove(&mut self, identity: &Identity) -> Option<Bytes> {
        self.entries.remove(&identity.entry_name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.entries.contains_key(&identity.entry_name())
    }

    pub fn get(&self, identity: &Identity) -> Option<&Bytes> {
        self.entries.get(&identity.entry_name())
    }

    /// Entry names in package order
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Pack the entries present right now into a zip package.
    ///
    /// Entries added afterwards are not part of the returned package. On
    /// failure the archive is left as it was, so the call can simply be
    /// repeated.
    pub async fn finalize(&self) -> Result<Package> {
        let snapshot: Vec<(String, Bytes)> = self
            .entries
            .iter()
            .map(|(name, blob)| (name.clone(), blob.clone()))
            .collect();
        let entries = snapshot.len();
        debug!(package = %self.package_name, entries, "Finalizing archive");

        let data = tokio::task::spawn_blocking(move || write_zip(&snapshot))
            .await
            .map_err(|e| TileBatchError::archive(format!("Archive task failed: {}", e)))??;

        info!(package = %self.package_name, entries, bytes = data.len(), "Archive ready");
        Ok(Package {
            name: self.package_name.clone(),
            data: Bytes::from(data),
            entries,
        })
    }
}

fn write_zip(entries: &[(String, Bytes)]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // Rendered PNGs are already compressed.
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, blob) in entries {
        // The zip header stores the name length as a u16.
        if name.len() > MAX_ENTRY_NAME_LEN {
            return Err(TileBatchError::archive(format!(
                "Entry name is {} bytes, limit is {}",
                name.len(),
                MAX_ENTRY_NAME_LEN
            )));
        }
        writer.start_file(name.as_str(), options)?;
        writer
            .write_all(blob)
            .map_err(|e| TileBatchError::archive(format!("Failed to write {}: {}", name, e)))?;
    }

    Ok(writer.finish()?.into_inner())
}

/// A finalized, downloadable archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Suggested file name
    pub name: String,
    /// Zip bytes
    pub data: Bytes,
    /// Number of entries packed
    pub entries: usize,
}

impl Package {
    /// Write the package into `dir` under its own name
    pub async fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.name);
        tokio::fs::write(&path, &self.data).await?;
        info!(path = %path.display(), "Package saved");
        Ok(path)
    }
}
