//! # Storage Module
//!
//! Handles all data persistence for the contribution tracker.
//!
//! The domain layer only sees the [`BlobStorage`] and [`ReportSink`] traits:
//! contributions are persisted as one serialized blob under a fixed key, and
//! exported reports are handed to a sink. File-backed implementations live in
//! [`file`]; test builds add process-local ones in `memory`.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Dependency Inversion**: Domain depends on storage abstractions, not implementations
//! - **Testability**: In-memory implementations for unit testing

pub mod contribution_store;
pub mod file;
#[cfg(test)]
pub mod memory;
pub mod traits;

/// Storage key of the contribution list
pub const CONTRIBUTIONS_KEY: &str = "contributions";

pub use contribution_store::ContributionStore;
pub use file::{FileConnection, ReportDirectory};
#[cfg(test)]
pub use memory::{MemoryConnection, MemoryReportSink};
pub use traits::{BlobStorage, Connection, ReportSink};
