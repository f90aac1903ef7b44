//! Email value objects.
//!
//! - [`RawEmailRecord`] - an unvalidated record as an upstream system reported it
//! - [`EmailType`] - open, string-backed type tag (HOME, BUSINESS, ...)
//! - [`EmailEntry`] - a validated, typed address with its preferred flag
//! - [`EmailCollection`] - entries in source order
//!
//! Raw records become entries through the [`normalizer`](crate::normalizer),
//! which drops invalid records instead of failing.

pub mod collection;
pub mod email_entry;
pub mod email_type;
pub mod raw_record;

pub use collection::EmailCollection;
pub use email_entry::{EmailEntry, validate_address};
pub use email_type::EmailType;
pub use raw_record::{PreferredFlag, RawEmailRecord};
