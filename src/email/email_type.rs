//! EmailType tag for typed email entries.
//!
//! Record systems tag every address with a category (HOME, BUSINESS, ...).
//! The set of tags is open: a new tag coming from upstream works without a
//! code change. The well-known tags are provided as constants.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A canonical email type tag.
///
/// Tags are trimmed and upper-cased on construction, so `" home"` and
/// `"HOME"` compare equal.
///
/// ## Examples
///
/// ```rust
/// use email_reconciler::email::EmailType;
///
/// let tag = EmailType::new("business").unwrap();
/// assert_eq!(tag, EmailType::BUSINESS);
/// assert_eq!(tag.as_str(), "BUSINESS");
///
/// assert!(EmailType::new("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailType(Cow<'static, str>);

impl EmailType {
    pub const HOME: EmailType = EmailType(Cow::Borrowed("HOME"));
    pub const BUSINESS: EmailType = EmailType(Cow::Borrowed("BUSINESS"));
    pub const WORK: EmailType = EmailType(Cow::Borrowed("WORK"));
    pub const CAMPUS: EmailType = EmailType(Cow::Borrowed("CAMPUS"));
    pub const INSEAD_LOGIN: EmailType = EmailType(Cow::Borrowed("INSEAD_LOGIN"));
    pub const LINKEDIN: EmailType = EmailType(Cow::Borrowed("LINKEDIN"));

    /// Build a tag from raw upstream text.
    ///
    /// Returns `None` when the text is empty after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self(Cow::Owned(trimmed.to_ascii_uppercase())))
    }

    /// The canonical tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the tags exposed as constants.
    pub fn is_well_known(&self) -> bool {
        Self::well_known().contains(self)
    }

    /// The tags exposed as constants, in declaration order.
    pub fn well_known() -> [EmailType; 6] {
        [
            Self::HOME,
            Self::BUSINESS,
            Self::WORK,
            Self::CAMPUS,
            Self::INSEAD_LOGIN,
            Self::LINKEDIN,
        ]
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(ValidationError::MissingType)
    }
}

impl From<EmailType> for String {
    fn from(value: EmailType) -> Self {
        value.0.into_owned()
    }
}

impl AsRef<str> for EmailType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
