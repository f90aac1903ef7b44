//! Preferred-email resolution and multi-type email reconciliation.
//!
//! Record systems keep several typed email addresses per person (HOME,
//! BUSINESS, CAMPUS, ...) and disagree about which one is preferred. This
//! crate turns a raw, possibly inconsistent set of records into a validated
//! collection plus one resolved default, and matches login identifiers
//! against it.
//!
//! # Core Components
//!
//! - [`Reconciler`] - normalizes records and resolves the preferred address
//! - [`normalizer`] - validation with a diagnostics side-channel instead of failures
//! - [`resolver`] - explicit `resolved` / `absent` / `no-flag-set` / `ambiguous` outcomes
//! - [`matcher`] - exact login identifier matching
//! - [`policy`] - opt-in defaults for callers that need one address anyway
//! - [`sync`] - comparison of the collections two record systems hold
//! - [`source`] - async adapter seam for upstream systems
//!
//! # Quick Start
//!
//! ```rust
//! use email_reconciler::{Reconciler, ResolutionStatus};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = Reconciler::default();
//! let result = reconciler.reconcile_json(r#"[
//!     {"type": "HOME", "address": "jane@home.example", "preferredFlag": "N"},
//!     {"type": "BUSINESS", "address": "jane@corp.example", "preferredFlag": "Y"},
//!     {"type": "LINKEDIN", "address": "not an address"}
//! ]"#)?;
//!
//! assert_eq!(result.preferred.status(), ResolutionStatus::Resolved);
//! assert_eq!(result.preferred_address(), Some("jane@corp.example"));
//! assert_eq!(result.diagnostics.rejected_count(), 1);
//! assert!(result.match_login("jane@home.example").matched);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod email;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod policy;
pub mod reconciler;
pub mod resolver;
pub mod source;
pub mod sync;

// Re-export commonly used types for convenience
pub use config::{DuplicatePolicy, ReconcilerBuilder, ReconcilerConfig};
pub use email::{EmailCollection, EmailEntry, EmailType, PreferredFlag, RawEmailRecord};
pub use error::{BuildError, ReconError, ReconResult, ValidationError, ValidationResult};
pub use matcher::{LoginMatch, match_login};
pub use normalizer::{Diagnostics, Normalized, RejectedRecord, normalize};
pub use policy::{FirstEntryPolicy, PreferencePolicy, TypePriorityPolicy};
pub use reconciler::{Reconciler, Reconciliation};
pub use resolver::{PreferredResolution, ResolutionStatus, resolve_preferred};
pub use source::{EmailSource, InMemoryEmailSource, SourceError};
pub use sync::{Fingerprint, SyncReport, check_sources, compare};
