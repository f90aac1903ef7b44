//! Caller-side preference policies.
//!
//! The resolver reports `no-flag-set` and `ambiguous` outcomes instead of
//! picking an address. A caller that needs a default anyway chooses a
//! [`PreferencePolicy`] and applies it explicitly, usually through
//! [`PreferredResolution::apply_policy`](crate::resolver::PreferredResolution::apply_policy).

use crate::email::{EmailEntry, EmailType};
use serde::{Deserialize, Serialize};

/// Chooses one entry out of a set of equally eligible candidates.
pub trait PreferencePolicy: Send + Sync {
    /// Pick a candidate, or `None` if the policy finds none acceptable.
    ///
    /// `candidates` are in source order.
    fn choose<'c>(&self, candidates: &'c [EmailEntry]) -> Option<&'c EmailEntry>;
}

/// Chooses the first candidate in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEntryPolicy;

impl PreferencePolicy for FirstEntryPolicy {
    fn choose<'c>(&self, candidates: &'c [EmailEntry]) -> Option<&'c EmailEntry> {
        candidates.first()
    }
}

/// Chooses by type tag priority.
///
/// The candidate whose tag appears earliest in `priority` wins; among
/// candidates with the same tag, source order decides. Candidates with a tag
/// not listed are never chosen.
///
/// ```rust
/// use email_reconciler::email::{EmailEntry, EmailType};
/// use email_reconciler::policy::{PreferencePolicy, TypePriorityPolicy};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let candidates = vec![
///         EmailEntry::new(EmailType::HOME, "home@x.com", false)?,
///         EmailEntry::new(EmailType::BUSINESS, "work@x.com", false)?,
///     ];
///     let policy = TypePriorityPolicy::new(vec![EmailType::BUSINESS, EmailType::HOME]);
///     assert_eq!(policy.choose(&candidates).map(|e| e.address()), Some("work@x.com"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypePriorityPolicy {
    priority: Vec<EmailType>,
}

impl TypePriorityPolicy {
    pub fn new(priority: Vec<EmailType>) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &[EmailType] {
        &self.priority
    }

    fn rank(&self, email_type: &EmailType) -> Option<usize> {
        self.priority.iter().position(|t| t == email_type)
    }
}

impl PreferencePolicy for TypePriorityPolicy {
    fn choose<'c>(&self, candidates: &'c [EmailEntry]) -> Option<&'c EmailEntry> {
        candidates
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| self.rank(entry.email_type()).map(|rank| (rank, index, entry)))
            .min_by_key(|(rank, index, _)| (*rank, *index))
            .map(|(_, _, entry)| entry)
    }
}

impl<P: PreferencePolicy + ?Sized> PreferencePolicy for &P {
    fn choose<'c>(&self, candidates: &'c [EmailEntry]) -> Option<&'c EmailEntry> {
        (**self).choose(candidates)
    }
}

impl<P: PreferencePolicy + ?Sized> PreferencePolicy for Box<P> {
    fn choose<'c>(&self, candidates: &'c [EmailEntry]) -> Option<&'c EmailEntry> {
        (**self).choose(candidates)
    }
}
