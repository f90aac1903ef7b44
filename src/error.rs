//! Error types for email reconciliation.
//!
//! Record-level problems never abort a reconciliation: they are captured as
//! [`ValidationError`] values inside the diagnostics of a normalization run.
//! Only contract violations by the caller (an untyped document that is not a
//! sequence, unparseable JSON) and upstream source failures travel the
//! [`ReconError`] path.

/// Main error type for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    /// A strict constructor rejected an email record
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Untyped input was not a sequence of records
    #[error("Expected a sequence of email records, got {actual}")]
    NotASequence { actual: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors from an upstream email source
    #[error("Email source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a single raw email record is rejected during normalization.
///
/// These are diagnostics, not failures: the offending record is dropped and
/// the rest of the collection is reconciled normally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Record has no address, or only whitespace
    #[error("Email record is missing an address")]
    MissingAddress,

    /// Address fails email syntax validation
    #[error("Invalid email address '{address}'")]
    InvalidAddress { address: String },

    /// Record has no type tag
    #[error("Email record is missing a type")]
    MissingType,

    /// Type tag is outside the configured allow-list
    #[error("Email type '{email_type}' is not allowed, allowed types: {allowed:?}")]
    UnknownType {
        email_type: String,
        allowed: Vec<String>,
    },

    /// Preferred flag is neither a boolean nor Y/N
    #[error("Invalid preferred flag '{value}', expected \"Y\", \"N\" or a boolean")]
    InvalidPreferredFlag { value: String },

    /// Untyped record is not an object
    #[error("Email record must be an object, got {actual}")]
    NotAnObject { actual: String },

    /// A record field has the wrong JSON type
    #[error("Field '{field}' has invalid type, expected {expected}, got {actual}")]
    InvalidFieldType {
        field: String,
        expected: String,
        actual: String,
    },
}

/// Errors raised while building a [`Reconciler`](crate::Reconciler).
///
/// These are programming errors and should surface during development.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl ReconError {
    /// Create a not-a-sequence error naming the JSON kind that was received
    pub fn not_a_sequence(actual: impl Into<String>) -> Self {
        Self::NotASequence {
            actual: actual.into(),
        }
    }

    /// Wrap an upstream source error
    pub fn source_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(error))
    }
}

impl ValidationError {
    /// Create an invalid address error
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create an invalid field type error
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl BuildError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Human-readable name of a JSON value's kind, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// Result type aliases for convenience
pub type ReconResult<T> = Result<T, ReconError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type BuildResult<T> = Result<T, BuildError>;
