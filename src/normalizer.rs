//! Normalization of raw upstream records into a validated [`EmailCollection`].
//!
//! Normalization never fails because of a bad record. Each record is checked
//! in isolation; records that fail are dropped and described in
//! [`Diagnostics`], while the survivors keep their source order. The only
//! hard error is being handed an untyped document that is not a sequence.
//!
//! Checks applied to each record, in order:
//!
//! 1. type tag present and non-blank
//! 2. address present, non-blank and a valid `local-part@domain` (after trimming)
//! 3. preferred flag absent, boolean, or `"Y"`/`"N"`
//! 4. type tag allowed by the configuration

use crate::config::{DuplicatePolicy, ReconcilerConfig};
use crate::email::{EmailCollection, EmailEntry, EmailType, RawEmailRecord, validate_address};
use crate::error::{ReconError, ReconResult, ValidationError, ValidationResult, json_kind};
use log::{debug, trace};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A record dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// Position of the record in the input sequence
    pub index: usize,
    /// Why it was dropped
    #[serde(serialize_with = "serialize_reason")]
    pub reason: ValidationError,
    /// The record as received on the untyped path. Typed records are shown
    /// serialized, with flags spelled `"Y"`/`"N"`.
    pub record: Value,
}

fn serialize_reason<S: Serializer>(reason: &ValidationError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

/// Side-channel report of what normalization removed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub rejected: Vec<RejectedRecord>,
    /// Entries folded into an earlier `(type, address)` twin under [`DuplicatePolicy::Merge`]
    pub merged_duplicates: Vec<EmailEntry>,
}

impl Diagnostics {
    /// Number of records dropped for validation reasons.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// True when nothing was rejected or merged.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.merged_duplicates.is_empty()
    }
}

/// Output of a normalization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub collection: EmailCollection,
    pub diagnostics: Diagnostics,
}

/// Normalize typed raw records.
///
/// ```rust
/// use email_reconciler::config::ReconcilerConfig;
/// use email_reconciler::email::RawEmailRecord;
/// use email_reconciler::normalizer::normalize;
///
/// let records = vec![
///     RawEmailRecord::new("HOME", "a@x.com"),
///     RawEmailRecord::new("BUSINESS", "not-an-email"),
///     RawEmailRecord::new("WORK", " c@x.com ").preferred("Y"),
/// ];
/// let normalized = normalize(&records, &ReconcilerConfig::default());
///
/// assert_eq!(normalized.collection.addresses().collect::<Vec<_>>(), vec!["a@x.com", "c@x.com"]);
/// assert_eq!(normalized.diagnostics.rejected[0].index, 1);
/// ```
pub fn normalize(records: &[RawEmailRecord], config: &ReconcilerConfig) -> Normalized {
    trace!("Normalizing {} email records", records.len());

    let mut entries = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match normalize_record(record, config) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                debug!("Dropping email record {}: {}", index, reason);
                rejected.push(RejectedRecord {
                    index,
                    reason,
                    record: serde_json::to_value(record).unwrap_or(Value::Null),
                });
            }
        }
    }

    finish(entries, rejected, config)
}

/// Normalize an untyped JSON document.
///
/// # Errors
///
/// Returns [`ReconError::NotASequence`] when `value` is not a JSON array.
/// Malformed elements are rejected individually, never as an error.
pub fn normalize_value(value: &Value, config: &ReconcilerConfig) -> ReconResult<Normalized> {
    let Value::Array(items) = value else {
        return Err(ReconError::not_a_sequence(json_kind(value)));
    };

    trace!("Normalizing {} untyped email records", items.len());

    let mut entries = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let outcome = RawEmailRecord::from_value(item)
            .and_then(|record| normalize_record(&record, config));

        match outcome {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                debug!("Dropping email record {}: {}", index, reason);
                rejected.push(RejectedRecord {
                    index,
                    reason,
                    record: item.clone(),
                });
            }
        }
    }

    Ok(finish(entries, rejected, config))
}

/// Validate a single raw record into an entry.
pub fn normalize_record(
    record: &RawEmailRecord,
    config: &ReconcilerConfig,
) -> ValidationResult<EmailEntry> {
    let email_type = record
        .email_type
        .as_deref()
        .and_then(EmailType::new)
        .ok_or(ValidationError::MissingType)?;

    let address = validate_address(record.address.as_deref().unwrap_or_default())?;

    let is_preferred = match &record.preferred_flag {
        Some(flag) => flag.to_bool()?,
        None => false,
    };

    if !config.allows(&email_type) {
        return Err(ValidationError::UnknownType {
            email_type: email_type.to_string(),
            allowed: config
                .allowed_types
                .iter()
                .flatten()
                .map(ToString::to_string)
                .collect(),
        });
    }

    Ok(EmailEntry::new_unchecked(
        email_type,
        address.to_string(),
        is_preferred,
    ))
}

fn finish(
    entries: Vec<EmailEntry>,
    rejected: Vec<RejectedRecord>,
    config: &ReconcilerConfig,
) -> Normalized {
    let collection = EmailCollection::new(entries);

    let (collection, merged_duplicates) = match config.duplicate_policy {
        DuplicatePolicy::Keep => (collection, Vec::new()),
        DuplicatePolicy::Merge => collection.deduplicated(),
    };

    if !merged_duplicates.is_empty() {
        debug!("Merged {} duplicate email entries", merged_duplicates.len());
    }

    Normalized {
        collection,
        diagnostics: Diagnostics {
            rejected,
            merged_duplicates,
        },
    }
}
