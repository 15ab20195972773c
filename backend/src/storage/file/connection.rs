use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::contribution_repository::ContributionRepository;
use crate::storage::traits::Connection;
use crate::storage::CONTRIBUTIONS_KEY;

/// FileConnection manages the data directory that holds the JSON blobs
#[derive(Clone, Debug)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new file connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Default data directory: ~/Documents/Faraja App
    pub fn default_data_directory() -> Result<PathBuf> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow!("Could not determine home directory"))?;

        Ok(PathBuf::from(home_dir).join("Documents").join("Faraja App"))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the file path backing a storage key
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }
}

impl Connection for FileConnection {
    type ContributionRepository = ContributionRepository;

    fn create_contribution_repository(&self) -> Self::ContributionRepository {
        ContributionRepository::new(self.clone(), CONTRIBUTIONS_KEY)
    }
}
