//! Upstream email sources.
//!
//! An [`EmailSource`] is the adapter between a record system (applicant
//! portal, HR system, a scraped profile page) and the reconciliation engine.
//! It only has to return raw records in source order; all validation happens
//! afterwards in the [`normalizer`](crate::normalizer).
//!
//! Sources are async because real ones sit behind a network call. The engine
//! itself stays synchronous.

pub mod in_memory;

pub use in_memory::{InMemoryEmailSource, InMemorySourceStats};

use crate::email::RawEmailRecord;
use std::future::Future;

/// Errors reported by the bundled sources.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The source holds no record set for this profile
    #[error("Profile '{profile_id}' not found in source '{source_name}'")]
    ProfileNotFound {
        source_name: String,
        profile_id: String,
    },

    /// The source cannot serve requests right now
    #[error("Source '{source_name}' is unavailable: {message}")]
    Unavailable { source_name: String, message: String },
}

/// A system that holds email records for profiles.
///
/// Implementations must be safe for concurrent use; the engine may fetch the
/// same profile from several sources at once.
pub trait EmailSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Fetch the raw email records of one profile, in source order.
    fn fetch(
        &self,
        profile_id: &str,
    ) -> impl Future<Output = Result<Vec<RawEmailRecord>, Self::Error>> + Send;
}
