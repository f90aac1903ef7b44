//! Configuration and builder for [`Reconciler`] instances.
//!
//! The defaults reproduce the behavior upstream systems expect: every type
//! tag is accepted and duplicate `(type, address)` entries are kept as-is.
//! Configuration can be deserialized from JSON (camelCase keys) or assembled
//! with [`ReconcilerBuilder`].

use crate::email::EmailType;
use crate::error::{BuildError, BuildResult};
use crate::reconciler::Reconciler;
use serde::{Deserialize, Serialize};

/// What normalization does with entries sharing a `(type, address)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep every entry in source order.
    #[default]
    Keep,
    /// Keep the first occurrence and fold later ones into it.
    Merge,
}

/// Settings for a reconciliation run.
///
/// ```rust
/// use email_reconciler::config::{DuplicatePolicy, ReconcilerConfig};
///
/// let config: ReconcilerConfig = serde_json::from_str(
///     r#"{"duplicatePolicy": "merge", "allowedTypes": ["home", "BUSINESS"]}"#,
/// ).unwrap();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::Merge);
/// assert_eq!(config.allowed_types.unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcilerConfig {
    pub duplicate_policy: DuplicatePolicy,

    /// Type tags accepted during normalization. `None` accepts any tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<EmailType>>,
}

impl ReconcilerConfig {
    /// Whether a tag passes the allow-list.
    pub fn allows(&self, email_type: &EmailType) -> bool {
        self.allowed_types
            .as_ref()
            .is_none_or(|allowed| allowed.contains(email_type))
    }

    /// Check the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfiguration`] when `allowed_types` is
    /// present but empty, which would reject every record.
    pub fn validate(&self) -> BuildResult<()> {
        if self.allowed_types.as_ref().is_some_and(Vec::is_empty) {
            return Err(BuildError::invalid_configuration(
                "allowedTypes is empty; omit it to accept every type",
            ));
        }
        Ok(())
    }
}

/// Builder for [`Reconciler`].
///
/// ```rust
/// use email_reconciler::{DuplicatePolicy, EmailType, Reconciler};
///
/// let reconciler = Reconciler::builder()
///     .duplicate_policy(DuplicatePolicy::Merge)
///     .allow_type(EmailType::HOME)
///     .allow_type(EmailType::BUSINESS)
///     .build()
///     .unwrap();
/// assert!(reconciler.config().allows(&EmailType::HOME));
/// assert!(!reconciler.config().allows(&EmailType::LINKEDIN));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReconcilerBuilder {
    config: ReconcilerConfig,
}

impl ReconcilerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Add one tag to the allow-list, creating the list if needed.
    pub fn allow_type(mut self, email_type: EmailType) -> Self {
        let allowed = self.config.allowed_types.get_or_insert_with(Vec::new);
        if !allowed.contains(&email_type) {
            allowed.push(email_type);
        }
        self
    }

    /// Replace the allow-list.
    pub fn allowed_types(mut self, types: impl IntoIterator<Item = EmailType>) -> Self {
        self.config.allowed_types = Some(types.into_iter().collect());
        self
    }

    /// Accept every type tag.
    pub fn allow_any_type(mut self) -> Self {
        self.config.allowed_types = None;
        self
    }

    pub fn build(self) -> BuildResult<Reconciler> {
        self.config.validate()?;
        Ok(Reconciler::new(self.config))
    }
}
