//! # In-Memory Storage
//!
//! Process-local stand-ins for the file backends. Clones of a
//! `MemoryConnection` share the same blob, so a store can be reloaded from a
//! connection to observe what a previous store persisted.

use anyhow::{anyhow, bail, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{BlobStorage, Connection, ReportSink};

#[derive(Clone, Debug, Default)]
pub struct MemoryConnection {
    blob: Arc<Mutex<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob, e.g. to simulate previously saved data
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let connection = Self::new();
        if let Ok(mut slot) = connection.blob.lock() {
            *slot = Some(blob.into());
        }
        connection
    }

    /// Make every subsequent write fail, as a full or read-only disk would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current stored blob
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Connection for MemoryConnection {
    type ContributionRepository = MemoryConnection;

    fn create_contribution_repository(&self) -> Self::ContributionRepository {
        self.clone()
    }
}

impl BlobStorage for MemoryConnection {
    fn read_blob(&self) -> Result<Option<String>> {
        let slot = self
            .blob
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(slot.clone())
    }

    fn write_blob(&self, blob: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("storage quota exceeded");
        }
        let mut slot = self
            .blob
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        *slot = Some(blob.to_string());
        Ok(())
    }
}

/// Keeps delivered reports in memory
#[derive(Clone, Debug, Default)]
pub struct MemoryReportSink {
    delivered: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivered (filename, content) pairs, oldest first
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered
            .lock()
            .map(|delivered| delivered.clone())
            .unwrap_or_default()
    }
}

impl ReportSink for MemoryReportSink {
    fn deliver(&self, filename: &str, content: &str) -> Result<String> {
        let mut delivered = self
            .delivered
            .lock()
            .map_err(|_| anyhow!("report sink lock poisoned"))?;
        delivered.push((filename.to_string(), content.to_string()));
        Ok(format!("memory://{}", filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_blob() {
        let connection = MemoryConnection::new();
        let repo = connection.create_contribution_repository();
        repo.write_blob("[1]").unwrap();
        assert_eq!(connection.blob().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_fail_writes_keeps_previous_blob() {
        let connection = MemoryConnection::with_blob("[]");
        connection.set_fail_writes(true);
        assert!(connection.write_blob("[1]").is_err());
        assert_eq!(connection.read_blob().unwrap().as_deref(), Some("[]"));
    }
}
