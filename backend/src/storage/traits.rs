//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;

/// Durable key-value storage holding one serialized blob.
///
/// The contribution store reads the blob once at start and rewrites it on
/// every change; implementations never see partial updates.
pub trait BlobStorage: Send + Sync {
    /// Read the stored blob, `None` if nothing has been written yet
    fn read_blob(&self) -> Result<Option<String>>;

    /// Replace the stored blob with `blob`
    fn write_blob(&self, blob: &str) -> Result<()>;
}

/// Destination for exported report files
pub trait ReportSink: Send + Sync {
    /// Deliver a report file and return where it ended up
    fn deliver(&self, filename: &str, content: &str) -> Result<String>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type (file system,
/// in-memory, etc.) and provides factory methods for creating repositories.
pub trait Connection: Send + Sync + Clone {
    /// The type of BlobStorage this connection creates for contributions
    type ContributionRepository: BlobStorage;

    /// Create a new contribution repository for this connection
    fn create_contribution_repository(&self) -> Self::ContributionRepository;
}
