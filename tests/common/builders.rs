//! Fluent builder for raw record lists.
//!
//! Produces both typed [`RawEmailRecord`]s and the equivalent JSON array so a
//! test can drive either entry point with the same data.

use email_reconciler::{PreferredFlag, RawEmailRecord};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Default)]
pub struct RecordsBuilder {
    items: Vec<Value>,
}

impl RecordsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record without a preferred flag.
    pub fn email(self, email_type: &str, address: &str) -> Self {
        self.push(json!({"type": email_type, "address": address}))
    }

    /// A record flagged "Y".
    pub fn preferred(self, email_type: &str, address: &str) -> Self {
        self.push(json!({"type": email_type, "address": address, "preferredFlag": "Y"}))
    }

    /// A record flagged "N".
    pub fn not_preferred(self, email_type: &str, address: &str) -> Self {
        self.push(json!({"type": email_type, "address": address, "preferredFlag": "N"}))
    }

    /// A record with an arbitrary flag value.
    pub fn flagged(self, email_type: &str, address: &str, flag: Value) -> Self {
        self.push(json!({"type": email_type, "address": address, "preferredFlag": flag}))
    }

    /// A record missing its `type` field.
    pub fn untyped(self, address: &str) -> Self {
        self.push(json!({"address": address}))
    }

    /// Any JSON value, including non-objects.
    pub fn push(mut self, item: Value) -> Self {
        self.items.push(item);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.items.clone())
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Typed records; non-object items are skipped.
    pub fn to_records(&self) -> Vec<RawEmailRecord> {
        self.items
            .iter()
            .filter_map(Value::as_object)
            .map(record_from_object)
            .collect()
    }
}

fn record_from_object(obj: &Map<String, Value>) -> RawEmailRecord {
    RawEmailRecord {
        email_type: obj.get("type").and_then(Value::as_str).map(String::from),
        address: obj.get("address").and_then(Value::as_str).map(String::from),
        preferred_flag: obj.get("preferredFlag").map(|flag| match flag {
            Value::Bool(b) => PreferredFlag::from(*b),
            Value::String(s) => PreferredFlag::parse(s),
            other => PreferredFlag::Unrecognized(other.to_string()),
        }),
    }
}
