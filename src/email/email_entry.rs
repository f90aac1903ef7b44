//! EmailEntry value object for validated, typed email addresses.
//!
//! An [`EmailEntry`] can only exist with a syntactically valid address and a
//! non-empty type tag. Both validating constructors and deserialization run
//! the same checks, so holding an `EmailEntry` is proof of validity.

use crate::email::email_type::EmailType;
use crate::email::raw_record::RawEmailRecord;
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

/// A validated email address with its type tag and preferred flag.
///
/// ## Validation Rules
///
/// - Address must not be empty after trimming
/// - Address must be a syntactically valid `local-part@domain`
/// - Type must not be empty after trimming
///
/// ## Examples
///
/// ```rust
/// use email_reconciler::email::{EmailEntry, EmailType};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let entry = EmailEntry::new(EmailType::BUSINESS, "jane@corp.example", true)?;
///     assert_eq!(entry.address(), "jane@corp.example");
///     assert!(entry.is_preferred());
///
///     assert!(EmailEntry::new(EmailType::HOME, "not an email", false).is_err());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEmailRecord")]
pub struct EmailEntry {
    #[serde(rename = "type")]
    email_type: EmailType,
    address: String,
    #[serde(rename = "isPreferred")]
    is_preferred: bool,
}

impl EmailEntry {
    /// Create a new EmailEntry, validating the address.
    ///
    /// Surrounding whitespace on the address is trimmed first.
    pub fn new(
        email_type: EmailType,
        address: impl AsRef<str>,
        is_preferred: bool,
    ) -> ValidationResult<Self> {
        let address = validate_address(address.as_ref())?;

        Ok(Self {
            email_type,
            address: address.to_string(),
            is_preferred,
        })
    }

    /// Create an EmailEntry without validation.
    ///
    /// The caller must guarantee the address is trimmed and valid.
    pub(crate) fn new_unchecked(email_type: EmailType, address: String, is_preferred: bool) -> Self {
        Self {
            email_type,
            address,
            is_preferred,
        }
    }

    /// Get the type tag.
    pub fn email_type(&self) -> &EmailType {
        &self.email_type
    }

    /// Get the address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether the upstream system flagged this entry as preferred.
    pub fn is_preferred(&self) -> bool {
        self.is_preferred
    }

    /// Copy of this entry with a different preferred flag.
    pub fn with_preferred(mut self, is_preferred: bool) -> Self {
        self.is_preferred = is_preferred;
        self
    }

    /// The `(type, address)` identity used for duplicate detection.
    pub fn key(&self) -> (&EmailType, &str) {
        (&self.email_type, &self.address)
    }
}

/// Check email syntax and return the trimmed address.
///
/// # Errors
///
/// * [`ValidationError::MissingAddress`] - the address is blank
/// * [`ValidationError::InvalidAddress`] - the address is not `local-part@domain`
pub fn validate_address(address: &str) -> ValidationResult<&str> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingAddress);
    }

    if !trimmed.validate_email() {
        return Err(ValidationError::invalid_address(trimmed));
    }

    Ok(trimmed)
}

impl fmt::Display for EmailEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.email_type, self.address)?;
        if self.is_preferred {
            write!(f, " (preferred)")?;
        }
        Ok(())
    }
}

impl TryFrom<RawEmailRecord> for EmailEntry {
    type Error = ValidationError;

    fn try_from(record: RawEmailRecord) -> ValidationResult<Self> {
        let email_type = record
            .email_type
            .as_deref()
            .and_then(EmailType::new)
            .ok_or(ValidationError::MissingType)?;
        let address = record.address.ok_or(ValidationError::MissingAddress)?;
        let is_preferred = match record.preferred_flag {
            Some(flag) => flag.to_bool()?,
            None => false,
        };

        Self::new(email_type, address, is_preferred)
    }
}

impl From<&EmailEntry> for RawEmailRecord {
    fn from(entry: &EmailEntry) -> Self {
        RawEmailRecord::new(entry.email_type.as_str(), entry.address.as_str())
            .preferred(entry.is_preferred)
    }
}
