//! # File Contribution Repository
//!
//! Stores the serialized contribution list as a single JSON file named after
//! its storage key, at the root of the data directory.
//!
//! ```text
//! data/
//! ├── contributions.json    ← This module manages this file
//! └── exports/
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a crash
//! mid-write leaves the previous blob intact.

use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use super::connection::FileConnection;
use crate::storage::traits::BlobStorage;

#[derive(Clone, Debug)]
pub struct ContributionRepository {
    connection: FileConnection,
    key: String,
}

impl ContributionRepository {
    pub fn new(connection: FileConnection, key: &str) -> Self {
        Self {
            connection,
            key: key.to_string(),
        }
    }

    fn blob_path(&self) -> PathBuf {
        self.connection.blob_path(&self.key)
    }
}

impl BlobStorage for ContributionRepository {
    fn read_blob(&self) -> Result<Option<String>> {
        let path = self.blob_path();
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_blob(&self, blob: &str) -> Result<()> {
        let path = self.blob_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, blob)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved {} bytes to {:?}", blob.len(), path);
        Ok(())
    }
}
