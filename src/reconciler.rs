//! The reconciliation engine.
//!
//! [`Reconciler`] runs normalization and preferred-email resolution in one
//! call and hands back a [`Reconciliation`], which serializes to the output
//! boundary consumed by callers:
//!
//! ```json
//! {
//!   "validatedCollection": [{"type": "HOME", "address": "a@x.com", "isPreferred": false}],
//!   "preferred": {"status": "resolved", "address": "a@x.com", "autoPromoted": true},
//!   "diagnostics": {"rejected": [], "mergedDuplicates": []}
//! }
//! ```
//!
//! A `Reconciler` holds only its configuration. It is `Send + Sync`, and
//! every call works on caller-owned data, so one instance can serve any
//! number of concurrent logins or sync cycles.

use crate::config::{ReconcilerBuilder, ReconcilerConfig};
use crate::email::{EmailCollection, RawEmailRecord};
use crate::error::{ReconError, ReconResult};
use crate::matcher::{LoginMatch, match_login};
use crate::normalizer::{self, Diagnostics, Normalized};
use crate::resolver::{PreferredResolution, resolve_preferred};
use crate::source::EmailSource;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Result of reconciling one fetch of email records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub validated_collection: EmailCollection,
    pub preferred: PreferredResolution,
    pub diagnostics: Diagnostics,
}

impl Reconciliation {
    fn from_normalized(normalized: Normalized) -> Self {
        let preferred = resolve_preferred(&normalized.collection);
        Self {
            validated_collection: normalized.collection,
            preferred,
            diagnostics: normalized.diagnostics,
        }
    }

    /// Resolved preferred address, if any.
    pub fn preferred_address(&self) -> Option<&str> {
        self.preferred.address()
    }

    /// Match a login candidate against the validated collection.
    pub fn match_login(&self, candidate: &str) -> LoginMatch<'_> {
        match_login(&self.validated_collection, candidate)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcilerConfig,
}

impl Reconciler {
    /// Create an engine with an already-validated configuration.
    ///
    /// Prefer [`Reconciler::builder`] for configurations assembled at runtime.
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> ReconcilerBuilder {
        ReconcilerBuilder::new()
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Normalize typed raw records without resolving a preferred address.
    pub fn normalize(&self, records: &[RawEmailRecord]) -> Normalized {
        normalizer::normalize(records, &self.config)
    }

    /// Normalize and resolve typed raw records.
    ///
    /// ```rust
    /// use email_reconciler::{RawEmailRecord, Reconciler};
    ///
    /// let reconciler = Reconciler::default();
    /// let result = reconciler.reconcile(&[
    ///     RawEmailRecord::new("HOME", "a@x.com").preferred("N"),
    ///     RawEmailRecord::new("BUSINESS", "b@x.com").preferred("Y"),
    /// ]);
    ///
    /// assert_eq!(result.preferred_address(), Some("b@x.com"));
    /// assert!(result.match_login(" a@x.com").matched);
    /// ```
    pub fn reconcile(&self, records: &[RawEmailRecord]) -> Reconciliation {
        let reconciliation = Reconciliation::from_normalized(self.normalize(records));
        log_outcome(&reconciliation);
        reconciliation
    }

    /// Normalize and resolve an untyped JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::NotASequence`] when `value` is not an array.
    pub fn reconcile_value(&self, value: &Value) -> ReconResult<Reconciliation> {
        let normalized = normalizer::normalize_value(value, &self.config)?;
        let reconciliation = Reconciliation::from_normalized(normalized);
        log_outcome(&reconciliation);
        Ok(reconciliation)
    }

    /// Parse JSON text and reconcile it.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Json`] for unparseable text and
    /// [`ReconError::NotASequence`] when the document is not an array.
    pub fn reconcile_json(&self, json: &str) -> ReconResult<Reconciliation> {
        let value: Value = serde_json::from_str(json)?;
        self.reconcile_value(&value)
    }

    /// Fetch a profile from a source and reconcile it.
    ///
    /// # Errors
    ///
    /// Returns [`ReconError::Source`] when the source fails.
    pub async fn reconcile_from<S>(&self, source: &S, profile_id: &str) -> ReconResult<Reconciliation>
    where
        S: EmailSource,
    {
        debug!("Fetching emails for '{}' from '{}'", profile_id, source.name());
        let records = source
            .fetch(profile_id)
            .await
            .map_err(ReconError::source_error)?;
        Ok(self.reconcile(&records))
    }
}

fn log_outcome(reconciliation: &Reconciliation) {
    if reconciliation.diagnostics.rejected_count() > 0 {
        info!(
            "Reconciled {} email entries, dropped {} invalid records; preferred: {}",
            reconciliation.validated_collection.len(),
            reconciliation.diagnostics.rejected_count(),
            reconciliation.preferred.status()
        );
    } else {
        debug!(
            "Reconciled {} email entries; preferred: {}",
            reconciliation.validated_collection.len(),
            reconciliation.preferred.status()
        );
    }
}
