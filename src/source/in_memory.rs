//! In-memory email source.
//!
//! Thread-safe [`EmailSource`] backed by a `HashMap` behind an async
//! `RwLock`. It stands in for a record system in tests and development, and
//! can be switched offline to exercise the unavailable path.
//!
//! # Example Usage
//!
//! ```rust
//! use email_reconciler::email::RawEmailRecord;
//! use email_reconciler::source::{EmailSource, InMemoryEmailSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let portal = InMemoryEmailSource::new("portal");
//! portal
//!     .insert("applicant-17", vec![RawEmailRecord::new("HOME", "jane@home.example")])
//!     .await;
//!
//! let records = portal.fetch("applicant-17").await?;
//! assert_eq!(records.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::email::RawEmailRecord;
use crate::source::{EmailSource, SourceError};
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct InMemoryEmailSource {
    name: String,
    // profile_id -> records in source order
    data: Arc<RwLock<HashMap<String, Vec<RawEmailRecord>>>>,
    online: Arc<AtomicBool>,
}

/// Snapshot of what an [`InMemoryEmailSource`] holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemorySourceStats {
    pub profile_count: usize,
    pub total_records: usize,
}

impl InMemoryEmailSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(RwLock::new(HashMap::new())),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Replace the records held for a profile, returning the previous ones.
    pub async fn insert(
        &self,
        profile_id: impl Into<String>,
        records: Vec<RawEmailRecord>,
    ) -> Option<Vec<RawEmailRecord>> {
        let mut data_guard = self.data.write().await;
        data_guard.insert(profile_id.into(), records)
    }

    /// Remove a profile, returning its records.
    pub async fn remove(&self, profile_id: &str) -> Option<Vec<RawEmailRecord>> {
        let mut data_guard = self.data.write().await;
        data_guard.remove(profile_id)
    }

    pub async fn stats(&self) -> InMemorySourceStats {
        let data_guard = self.data.read().await;
        InMemorySourceStats {
            profile_count: data_guard.len(),
            total_records: data_guard.values().map(Vec::len).sum(),
        }
    }

    pub async fn clear(&self) {
        let mut data_guard = self.data.write().await;
        data_guard.clear();
    }

    /// Simulate an outage; fetches fail with [`SourceError::Unavailable`] while offline.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl EmailSource for InMemoryEmailSource {
    type Error = SourceError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, profile_id: &str) -> Result<Vec<RawEmailRecord>, Self::Error> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable {
                source_name: self.name.clone(),
                message: "source is offline".to_string(),
            });
        }

        let data_guard = self.data.read().await;
        let records = data_guard
            .get(profile_id)
            .cloned()
            .ok_or_else(|| SourceError::ProfileNotFound {
                source_name: self.name.clone(),
                profile_id: profile_id.to_string(),
            })?;

        trace!(
            "Fetched {} email records for '{}' from '{}'",
            records.len(),
            profile_id,
            self.name
        );
        Ok(records)
    }
}
