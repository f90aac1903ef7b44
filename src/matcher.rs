//! Login identifier matching.
//!
//! A candidate matches an entry when, after trimming surrounding whitespace
//! from the candidate, the two strings are identical. No case folding is
//! applied to either the local part or the domain.

use crate::email::{EmailCollection, EmailEntry};
use log::trace;
use serde::Serialize;

/// Outcome of matching a login candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoginMatch<'a> {
    pub matched: bool,
    /// First matching entry in collection order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<&'a EmailEntry>,
}

impl<'a> LoginMatch<'a> {
    fn found(entry: Option<&'a EmailEntry>) -> Self {
        Self {
            matched: entry.is_some(),
            entry,
        }
    }
}

/// Match a candidate login identifier against a collection.
///
/// ```rust
/// use email_reconciler::email::{EmailCollection, EmailEntry, EmailType};
/// use email_reconciler::matcher::match_login;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let emails = EmailCollection::new(vec![EmailEntry::new(EmailType::HOME, "a@x.com", false)?]);
///
///     assert!(match_login(&emails, "a@x.com ").matched);
///     assert!(!match_login(&emails, "A@x.com").matched);
///     Ok(())
/// }
/// ```
pub fn match_login<'a>(collection: &'a EmailCollection, candidate: &str) -> LoginMatch<'a> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return LoginMatch::found(None);
    }

    let entry = collection.find(|entry| entry.address() == candidate);
    trace!("Login candidate matched: {}", entry.is_some());
    LoginMatch::found(entry)
}

/// Every entry holding the candidate address, in collection order.
///
/// The same address can be stored under several type tags.
pub fn matching_entries<'a>(collection: &'a EmailCollection, candidate: &str) -> Vec<&'a EmailEntry> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Vec::new();
    }

    collection
        .iter()
        .filter(|entry| entry.address() == candidate)
        .collect()
}
