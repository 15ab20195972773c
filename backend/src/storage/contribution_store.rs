//! # Contribution Store
//!
//! Owns the in-memory contribution list (newest first) and mirrors it to a
//! [`BlobStorage`] as one JSON array. The list is read once in [`load`] and
//! rewritten in full on every [`append`].
//!
//! [`load`]: ContributionStore::load
//! [`append`]: ContributionStore::append

use anyhow::{bail, Result};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, error, info, warn};

use super::traits::BlobStorage;
use crate::domain::models::contribution::Contribution;

pub struct ContributionStore<S: BlobStorage> {
    storage: S,
    contributions: RwLock<Vec<Contribution>>,
}

impl<S: BlobStorage> ContributionStore<S> {
    /// Restore the persisted collection.
    ///
    /// Missing, unreadable or malformed data yields an empty store; the
    /// problem is logged and never returned to the caller.
    pub fn load(storage: S) -> Self {
        let contributions = match storage.read_blob() {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Contribution>>(&blob) {
                Ok(contributions) => {
                    info!("Loaded {} saved contributions", contributions.len());
                    contributions
                }
                Err(e) => {
                    warn!("Failed to parse saved contributions, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No saved contributions found");
                Vec::new()
            }
            Err(e) => {
                error!("Failed to read saved contributions, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            storage,
            contributions: RwLock::new(contributions),
        }
    }

    /// Prepend a record and persist the whole collection.
    ///
    /// Rejects a record whose ID is already stored. If the write fails the
    /// record is removed again, so memory never runs ahead of storage.
    pub fn append(&self, contribution: Contribution) -> Result<()> {
        let mut contributions = self
            .contributions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if contributions.iter().any(|c| c.id == contribution.id) {
            bail!("Contribution ID already exists: {}", contribution.id);
        }

        contributions.insert(0, contribution);

        let persisted = serde_json::to_string(&*contributions)
            .map_err(anyhow::Error::from)
            .and_then(|blob| self.storage.write_blob(&blob));

        if let Err(e) = persisted {
            contributions.remove(0);
            return Err(e.context("Failed to persist contributions"));
        }

        debug!("Persisted {} contributions", contributions.len());
        Ok(())
    }

    /// Snapshot of all records, newest first
    pub fn all(&self) -> Vec<Contribution> {
        self.with_contributions(|contributions| contributions.to_vec())
    }

    /// Run a read-only query against the current records without copying them
    pub fn with_contributions<R>(&self, query: impl FnOnce(&[Contribution]) -> R) -> R {
        let contributions = self
            .contributions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        query(&contributions)
    }

    pub fn len(&self) -> usize {
        self.with_contributions(|contributions| contributions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
