//! Raw, unvalidated email records as delivered by an upstream system.
//!
//! Upstream systems disagree on field names and on how the preferred flag is
//! spelled (`"Y"`/`"N"` strings in one, booleans in the other). A
//! [`RawEmailRecord`] accepts all of those shapes and defers every semantic
//! check to the normalizer, so a bad address or flag never poisons a whole
//! fetch.
//!
//! Typed deserialization and [`RawEmailRecord::from_value`] share one reader:
//! the first accepted alias present wins, and other aliases are ignored. A
//! field holding the wrong JSON type can only be isolated per record on the
//! untyped path (`Reconciler::reconcile_value`); typed deserialization fails
//! with the same message.

use crate::error::{ValidationError, ValidationResult, json_kind};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Field names accepted for the address, in lookup order.
const ADDRESS_FIELDS: [&str; 3] = ["address", "value", "email"];

/// Field names accepted for the preferred flag, in lookup order.
const PREFERRED_FIELDS: [&str; 3] = ["preferredFlag", "isPreferred", "primary"];

/// The preferred flag of a raw record.
///
/// Unrecognized spellings are kept rather than failing deserialization; the
/// normalizer rejects the record that carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferredFlag {
    Yes,
    No,
    Unrecognized(String),
}

impl PreferredFlag {
    /// Parse the textual spelling used by record systems (`"Y"` / `"N"`).
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("y") {
            Self::Yes
        } else if trimmed.eq_ignore_ascii_case("n") {
            Self::No
        } else {
            Self::Unrecognized(raw.to_string())
        }
    }

    /// Resolve to a boolean, or fail for an unrecognized spelling.
    pub fn to_bool(&self) -> ValidationResult<bool> {
        match self {
            Self::Yes => Ok(true),
            Self::No => Ok(false),
            Self::Unrecognized(value) => Err(ValidationError::InvalidPreferredFlag {
                value: value.clone(),
            }),
        }
    }
}

impl From<bool> for PreferredFlag {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl Serialize for PreferredFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Yes => serializer.serialize_str("Y"),
            Self::No => serializer.serialize_str("N"),
            Self::Unrecognized(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for PreferredFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl Visitor<'_> for FlagVisitor {
            type Value = PreferredFlag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or a \"Y\"/\"N\" string")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(PreferredFlag::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(PreferredFlag::parse(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(PreferredFlag::Unrecognized(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(PreferredFlag::Unrecognized(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(PreferredFlag::Unrecognized(v.to_string()))
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// One email record exactly as an upstream system reported it.
///
/// ## Examples
///
/// ```rust
/// use email_reconciler::email::{PreferredFlag, RawEmailRecord};
/// use serde_json::json;
///
/// let record: RawEmailRecord = serde_json::from_value(json!({
///     "type": "HOME",
///     "address": "jane@example.com",
///     "preferredFlag": "Y"
/// })).unwrap();
/// assert_eq!(record.preferred_flag, Some(PreferredFlag::Yes));
///
/// let typed = RawEmailRecord::new("BUSINESS", "jane@corp.example").preferred(false);
/// assert_eq!(typed.preferred_flag, Some(PreferredFlag::No));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RawEmailRecord {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "preferredFlag", skip_serializing_if = "Option::is_none")]
    pub preferred_flag: Option<PreferredFlag>,
}

impl<'de> Deserialize<'de> for RawEmailRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(de::Error::custom)
    }
}

impl RawEmailRecord {
    /// Create a record with a type and address and no preferred flag.
    pub fn new(email_type: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            email_type: Some(email_type.into()),
            address: Some(address.into()),
            preferred_flag: None,
        }
    }

    /// Set the preferred flag.
    pub fn preferred(mut self, flag: impl Into<PreferredFlag>) -> Self {
        self.preferred_flag = Some(flag.into());
        self
    }

    /// Read a record out of an untyped JSON value.
    ///
    /// Unlike `serde_json::from_value`, this reports which field is wrong so
    /// the rejection reason can be surfaced in diagnostics.
    pub fn from_value(value: &Value) -> ValidationResult<Self> {
        let Value::Object(obj) = value else {
            return Err(ValidationError::NotAnObject {
                actual: json_kind(value).to_string(),
            });
        };

        let email_type = optional_string(obj, &["type"])?;
        let address = optional_string(obj, &ADDRESS_FIELDS)?;

        let preferred_flag = match first_present(obj, &PREFERRED_FIELDS) {
            None => None,
            Some((_, Value::Bool(b))) => Some(PreferredFlag::from(*b)),
            Some((_, Value::String(s))) => Some(PreferredFlag::parse(s)),
            Some((_, other)) => Some(PreferredFlag::Unrecognized(other.to_string())),
        };

        Ok(Self {
            email_type,
            address,
            preferred_flag,
        })
    }
}

impl From<&str> for PreferredFlag {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// First non-null field among `names`.
fn first_present<'a>(obj: &'a Map<String, Value>, names: &[&'a str]) -> Option<(&'a str, &'a Value)> {
    names
        .iter()
        .find_map(|name| obj.get(*name).filter(|v| !v.is_null()).map(|v| (*name, v)))
}

fn optional_string(obj: &Map<String, Value>, names: &[&str]) -> ValidationResult<Option<String>> {
    match first_present(obj, names) {
        None => Ok(None),
        Some((_, Value::String(s))) => Ok(Some(s.clone())),
        Some((field, other)) => Err(ValidationError::invalid_field(
            field,
            "string",
            json_kind(other),
        )),
    }
}
