//! Ordered collection of validated email entries.
//!
//! ## Design Principles
//!
//! - **Source Order**: entries keep the order the upstream system reported
//! - **Validated Only**: every element is an [`EmailEntry`], so every address is valid
//! - **Immutable Operations**: transformations return new collections
//! - **No Implicit Merging**: duplicates stay unless [`EmailCollection::deduplicated`] is called
//!
//! ## Usage Pattern
//!
//! ```rust
//! use email_reconciler::email::{EmailCollection, EmailEntry, EmailType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emails = EmailCollection::new(vec![
//!         EmailEntry::new(EmailType::HOME, "jane@home.example", false)?,
//!         EmailEntry::new(EmailType::BUSINESS, "jane@corp.example", true)?,
//!     ]);
//!
//!     assert_eq!(emails.len(), 2);
//!     assert_eq!(emails.flagged_preferred().len(), 1);
//!     assert!(emails.contains_address("jane@corp.example"));
//!     Ok(())
//! }
//! ```

use crate::email::email_entry::EmailEntry;
use crate::email::email_type::EmailType;
use crate::email::raw_record::RawEmailRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered sequence of validated email entries.
///
/// Deserialization is strict: a document containing an invalid entry fails
/// as a whole. Use the [`normalizer`](crate::normalizer) for lenient input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailCollection {
    entries: Vec<EmailEntry>,
}

impl EmailCollection {
    /// Creates a collection from already-validated entries, keeping their order.
    pub fn new(entries: Vec<EmailEntry>) -> Self {
        Self { entries }
    }

    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[EmailEntry] {
        &self.entries
    }

    /// Iterator over entries in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, EmailEntry> {
        self.entries.iter()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&EmailEntry> {
        self.entries.get(index)
    }

    /// First entry in source order.
    pub fn first(&self) -> Option<&EmailEntry> {
        self.entries.first()
    }

    /// First entry matching the predicate.
    pub fn find<F>(&self, predicate: F) -> Option<&EmailEntry>
    where
        F: Fn(&EmailEntry) -> bool,
    {
        self.entries.iter().find(|entry| predicate(entry))
    }

    /// New collection containing only entries matching the predicate.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&EmailEntry) -> bool,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| predicate(entry))
                .cloned()
                .collect(),
        }
    }

    /// Entries carrying the given type tag.
    pub fn of_type(&self, email_type: &EmailType) -> Vec<&EmailEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.email_type() == email_type)
            .collect()
    }

    /// Entries whose stored preferred flag is set, in source order.
    pub fn flagged_preferred(&self) -> Vec<&EmailEntry> {
        self.entries.iter().filter(|entry| entry.is_preferred()).collect()
    }

    /// Whether any entry holds exactly this address.
    pub fn contains_address(&self, address: &str) -> bool {
        self.entries.iter().any(|entry| entry.address() == address)
    }

    /// Addresses in source order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(EmailEntry::address)
    }

    /// Merge entries sharing a `(type, address)` pair.
    ///
    /// The first occurrence keeps its position. It becomes preferred if any
    /// of its duplicates was flagged preferred. Returns the merged collection
    /// and the folded duplicates in source order.
    pub fn deduplicated(self) -> (Self, Vec<EmailEntry>) {
        let mut kept: Vec<EmailEntry> = Vec::with_capacity(self.entries.len());
        let mut positions: HashMap<(EmailType, String), usize> = HashMap::new();
        let mut folded = Vec::new();

        for entry in self.entries {
            let (email_type, address) = entry.key();
            let key = (email_type.clone(), address.to_string());
            match positions.get(&key) {
                Some(&index) => {
                    if entry.is_preferred() {
                        kept[index] = kept[index].clone().with_preferred(true);
                    }
                    folded.push(entry);
                }
                None => {
                    positions.insert(key, kept.len());
                    kept.push(entry);
                }
            }
        }

        (Self { entries: kept }, folded)
    }

    /// Raw records equivalent to this collection, for re-normalization or export.
    pub fn to_raw_records(&self) -> Vec<RawEmailRecord> {
        self.entries.iter().map(RawEmailRecord::from).collect()
    }
}

impl From<Vec<EmailEntry>> for EmailCollection {
    fn from(entries: Vec<EmailEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<EmailEntry> for EmailCollection {
    fn from_iter<I: IntoIterator<Item = EmailEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EmailCollection {
    type Item = EmailEntry;
    type IntoIter = std::vec::IntoIter<EmailEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a EmailCollection {
    type Item = &'a EmailEntry;
    type IntoIter = std::slice::Iter<'a, EmailEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
