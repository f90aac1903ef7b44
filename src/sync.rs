//! Cross-system consistency checks.
//!
//! Two record systems (say an applicant portal and an HR system) often hold
//! different email data for the same person. [`compare`] lines up two
//! validated collections and reports where they disagree; [`check_sources`]
//! fetches and reconciles a profile from two [`EmailSource`]s first.
//!
//! Addresses are compared exactly, without case folding, the same way the
//! login matcher compares them.
//!
//! # Fingerprints
//!
//! Each side carries a [`Fingerprint`]: SHA-256 over the sorted canonical
//! form of its entries, truncated to 8 bytes and base64 encoded. Entry order
//! does not affect it, so two systems listing the same entries in different
//! orders share a fingerprint. Storing the fingerprint from the last sync
//! is enough to tell whether a later fetch changed anything.

use crate::email::{EmailCollection, EmailEntry, EmailType};
use crate::error::ReconResult;
use crate::reconciler::{Reconciler, Reconciliation};
use crate::resolver::{PreferredResolution, resolve_preferred};
use crate::source::EmailSource;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

/// Order-insensitive content hash of an [`EmailCollection`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(collection: &EmailCollection) -> Self {
        let mut lines: Vec<String> = collection
            .iter()
            .map(|entry| {
                format!(
                    "{}\u{1f}{}\u{1f}{}",
                    entry.email_type(),
                    entry.address(),
                    if entry.is_preferred() { 'Y' } else { 'N' }
                )
            })
            .collect();
        lines.sort();

        let mut hasher = Sha256::new();
        for line in &lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        let hash = hasher.finalize();

        Self(BASE64.encode(&hash[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An address both sides hold, under different type tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMismatch {
    pub address: String,
    pub left_types: Vec<EmailType>,
    pub right_types: Vec<EmailType>,
}

/// The two sides resolve to different preferred outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferredMismatch {
    pub left: PreferredResolution,
    pub right: PreferredResolution,
}

/// Where two collections for the same person disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub in_sync: bool,
    pub left_fingerprint: Fingerprint,
    pub right_fingerprint: Fingerprint,
    /// Entries whose address does not appear on the right, in left order
    pub only_left: Vec<EmailEntry>,
    /// Entries whose address does not appear on the left, in right order
    pub only_right: Vec<EmailEntry>,
    pub type_mismatches: Vec<TypeMismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_mismatch: Option<PreferredMismatch>,
}

/// Compare two validated collections.
///
/// ```rust
/// use email_reconciler::email::{EmailCollection, EmailEntry, EmailType};
/// use email_reconciler::sync::compare;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let portal = EmailCollection::new(vec![
///         EmailEntry::new(EmailType::HOME, "jane@home.example", true)?,
///     ]);
///     let hr = EmailCollection::new(vec![
///         EmailEntry::new(EmailType::HOME, "jane@home.example", false)?,
///         EmailEntry::new(EmailType::BUSINESS, "jane@corp.example", true)?,
///     ]);
///
///     let report = compare(&portal, &hr);
///     assert!(!report.in_sync);
///     assert_eq!(report.only_right[0].address(), "jane@corp.example");
///     assert!(report.preferred_mismatch.is_some());
///     Ok(())
/// }
/// ```
pub fn compare(left: &EmailCollection, right: &EmailCollection) -> SyncReport {
    let only_left = entries_missing_from(left, right);
    let only_right = entries_missing_from(right, left);

    let mut type_mismatches = Vec::new();
    let mut seen = BTreeSet::new();
    for address in left.addresses() {
        if !seen.insert(address) || !right.contains_address(address) {
            continue;
        }

        let left_types = types_of(left, address);
        let right_types = types_of(right, address);
        let left_set: BTreeSet<_> = left_types.iter().collect();
        let right_set: BTreeSet<_> = right_types.iter().collect();
        if left_set != right_set {
            type_mismatches.push(TypeMismatch {
                address: address.to_string(),
                left_types,
                right_types,
            });
        }
    }

    let left_preferred = resolve_preferred(left);
    let right_preferred = resolve_preferred(right);
    let preferred_mismatch = (!same_outcome(&left_preferred, &right_preferred))
    .then_some(PreferredMismatch {
        left: left_preferred,
        right: right_preferred,
    });

    let left_fingerprint = Fingerprint::of(left);
    let right_fingerprint = Fingerprint::of(right);

    let in_sync = left_fingerprint == right_fingerprint
        && only_left.is_empty()
        && only_right.is_empty()
        && type_mismatches.is_empty()
        && preferred_mismatch.is_none();

    debug!(
        "Compared {} and {} email entries: in sync = {}",
        left.len(),
        right.len(),
        in_sync
    );

    SyncReport {
        in_sync,
        left_fingerprint,
        right_fingerprint,
        only_left,
        only_right,
        type_mismatches,
        preferred_mismatch,
    }
}

fn entries_missing_from(from: &EmailCollection, other: &EmailCollection) -> Vec<EmailEntry> {
    from.iter()
        .filter(|entry| !other.contains_address(entry.address()))
        .cloned()
        .collect()
}

/// Whether two resolutions name the same preferred outcome.
///
/// `autoPromoted` is ignored. Conflict sets are compared regardless of order.
fn same_outcome(left: &PreferredResolution, right: &PreferredResolution) -> bool {
    match (left, right) {
        (
            PreferredResolution::Resolved { address: l, .. },
            PreferredResolution::Resolved { address: r, .. },
        ) => l == r,
        (
            PreferredResolution::Ambiguous { conflicts: l },
            PreferredResolution::Ambiguous { conflicts: r },
        ) => sorted_keys(l) == sorted_keys(r),
        _ => left.status() == right.status(),
    }
}

fn sorted_keys(entries: &[EmailEntry]) -> Vec<(&EmailType, &str)> {
    let mut keys: Vec<_> = entries.iter().map(EmailEntry::key).collect();
    keys.sort();
    keys
}

/// Distinct tags an address is stored under, in first-seen order.
fn types_of(collection: &EmailCollection, address: &str) -> Vec<EmailType> {
    let mut types: Vec<EmailType> = Vec::new();
    for entry in collection.iter().filter(|e| e.address() == address) {
        if !types.contains(entry.email_type()) {
            types.push(entry.email_type().clone());
        }
    }
    types
}

/// Both reconciliations of a profile plus their comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncCheck {
    pub left: Reconciliation,
    pub right: Reconciliation,
    pub report: SyncReport,
}

/// Fetch one profile from two sources, reconcile both sides and compare them.
///
/// Both fetches run concurrently.
///
/// # Errors
///
/// Returns [`ReconError::Source`](crate::ReconError::Source) if either source fails.
pub async fn check_sources<L, R>(
    reconciler: &Reconciler,
    left: &L,
    right: &R,
    profile_id: &str,
) -> ReconResult<SyncCheck>
where
    L: EmailSource,
    R: EmailSource,
{
    let (left, right) = tokio::join!(
        reconciler.reconcile_from(left, profile_id),
        reconciler.reconcile_from(right, profile_id)
    );
    let (left, right) = (left?, right?);

    let report = compare(&left.validated_collection, &right.validated_collection);
    if !report.in_sync {
        info!(
            "Email records for '{}' differ: {} only left, {} only right, {} type mismatches",
            profile_id,
            report.only_left.len(),
            report.only_right.len(),
            report.type_mismatches.len()
        );
    }

    Ok(SyncCheck {
        left,
        right,
        report,
    })
}
