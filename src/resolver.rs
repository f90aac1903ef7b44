//! Preferred-email resolution.
//!
//! Reduces a validated collection to one authoritative address, or to an
//! explicit state telling the caller why it could not:
//!
//! | entries | flagged preferred | outcome |
//! |---------|-------------------|---------|
//! | 0       | -                 | [`PreferredResolution::Absent`] |
//! | 1       | any               | [`PreferredResolution::Resolved`] (auto-promoted) |
//! | > 1     | 1                 | [`PreferredResolution::Resolved`] |
//! | > 1     | 0                 | [`PreferredResolution::NoFlagSet`] |
//! | > 1     | > 1               | [`PreferredResolution::Ambiguous`] |
//!
//! The resolver never guesses. Defaults for the last two rows belong to a
//! caller-chosen [`PreferencePolicy`](crate::policy::PreferencePolicy).

use crate::email::{EmailCollection, EmailEntry};
use crate::policy::PreferencePolicy;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of preferred-email resolution.
///
/// Serializes with a `status` tag:
///
/// ```rust
/// use email_reconciler::resolver::PreferredResolution;
/// use serde_json::json;
///
/// let absent = serde_json::to_value(PreferredResolution::Absent).unwrap();
/// assert_eq!(absent, json!({"status": "absent"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum PreferredResolution {
    /// One address is authoritative.
    Resolved {
        address: String,
        /// The collection held a single entry whose stored flag was not set
        #[serde(rename = "autoPromoted")]
        auto_promoted: bool,
    },
    /// The collection is empty.
    Absent,
    /// Several entries, none flagged preferred.
    NoFlagSet,
    /// Several entries flagged preferred, listed in source order.
    Ambiguous { conflicts: Vec<EmailEntry> },
}

/// Status tag of a [`PreferredResolution`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    Resolved,
    Absent,
    NoFlagSet,
    Ambiguous,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::Absent => "absent",
            Self::NoFlagSet => "no-flag-set",
            Self::Ambiguous => "ambiguous",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PreferredResolution {
    pub fn status(&self) -> ResolutionStatus {
        match self {
            Self::Resolved { .. } => ResolutionStatus::Resolved,
            Self::Absent => ResolutionStatus::Absent,
            Self::NoFlagSet => ResolutionStatus::NoFlagSet,
            Self::Ambiguous { .. } => ResolutionStatus::Ambiguous,
        }
    }

    /// The resolved address, if resolution succeeded.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Resolved { address, .. } => Some(address.as_str()),
            _ => None,
        }
    }

    /// Conflicting entries; empty unless ambiguous.
    pub fn conflicts(&self) -> &[EmailEntry] {
        match self {
            Self::Ambiguous { conflicts } => conflicts.as_slice(),
            _ => &[],
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Fall back to a caller policy when no single entry was flagged.
    ///
    /// A resolved outcome is returned as-is. For [`NoFlagSet`](Self::NoFlagSet)
    /// the policy chooses among all entries of `collection`. An ambiguous
    /// outcome is only handed to the policy when `break_ties` is true, and
    /// then only the conflicting entries are candidates. `Absent` stays
    /// absent.
    pub fn apply_policy<'a, P>(
        &'a self,
        collection: &'a EmailCollection,
        policy: &P,
        break_ties: bool,
    ) -> Option<&'a str>
    where
        P: PreferencePolicy + ?Sized,
    {
        match self {
            Self::Resolved { address, .. } => Some(address.as_str()),
            Self::Absent => None,
            Self::NoFlagSet => policy.choose(collection.entries()).map(EmailEntry::address),
            Self::Ambiguous { conflicts } if break_ties => {
                policy.choose(conflicts).map(EmailEntry::address)
            }
            Self::Ambiguous { .. } => None,
        }
    }
}

/// Resolve the preferred address of a validated collection.
///
/// ```rust
/// use email_reconciler::email::{EmailCollection, EmailEntry, EmailType};
/// use email_reconciler::resolver::{resolve_preferred, ResolutionStatus};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let single = EmailCollection::new(vec![EmailEntry::new(EmailType::HOME, "a@x.com", false)?]);
///     assert_eq!(resolve_preferred(&single).address(), Some("a@x.com"));
///
///     let both = EmailCollection::new(vec![
///         EmailEntry::new(EmailType::HOME, "a@x.com", true)?,
///         EmailEntry::new(EmailType::BUSINESS, "b@x.com", true)?,
///     ]);
///     assert_eq!(resolve_preferred(&both).status(), ResolutionStatus::Ambiguous);
///     Ok(())
/// }
/// ```
pub fn resolve_preferred(collection: &EmailCollection) -> PreferredResolution {
    let resolution = match collection.entries() {
        [] => PreferredResolution::Absent,
        [only] => PreferredResolution::Resolved {
            address: only.address().to_string(),
            auto_promoted: !only.is_preferred(),
        },
        entries => {
            let flagged: Vec<&EmailEntry> = entries.iter().filter(|e| e.is_preferred()).collect();
            match flagged.as_slice() {
                [] => PreferredResolution::NoFlagSet,
                [preferred] => PreferredResolution::Resolved {
                    address: preferred.address().to_string(),
                    auto_promoted: false,
                },
                conflicts => {
                    warn!(
                        "{} email entries are flagged preferred; leaving preference unresolved",
                        conflicts.len()
                    );
                    PreferredResolution::Ambiguous {
                        conflicts: conflicts.iter().map(|e| (*e).clone()).collect(),
                    }
                }
            }
        }
    };

    debug!(
        "Resolved preferred email over {} entries: {}",
        collection.len(),
        resolution.status()
    );
    resolution
}
