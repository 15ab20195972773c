use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::storage::traits::ReportSink;

/// Writes exported reports into a directory on disk
#[derive(Clone, Debug)]
pub struct ReportDirectory {
    directory: PathBuf,
}

impl ReportDirectory {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ReportSink for ReportDirectory {
    fn deliver(&self, filename: &str, content: &str) -> Result<String> {
        fs::create_dir_all(&self.directory)?;

        let file_path = self.directory.join(filename);
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &file_path)?;

        let location = file_path.to_string_lossy().to_string();
        info!("Wrote {} bytes to {}", content.len(), location);
        Ok(location)
    }
}
