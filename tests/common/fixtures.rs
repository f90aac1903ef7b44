//! Record sets loaded from `tests/fixtures/`.
//!
//! - `portal_profile.json` - an applicant portal export with one bad address
//! - `hr_profile.json` - the same person as an HR system stores them
//! - `messy_profile.json` - duplicates, conflicting flags and malformed records

use serde_json::Value;
use std::path::PathBuf;

/// Load a fixture file as raw JSON text.
pub fn load_fixture_text(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

/// Load and parse a fixture file.
pub fn load_fixture(name: &str) -> Value {
    let text = load_fixture_text(name);
    serde_json::from_str(&text)
        .unwrap_or_else(|_| panic!("Failed to parse JSON fixture: {}", name))
}

pub fn portal_profile() -> Value {
    load_fixture("portal_profile.json")
}

pub fn hr_profile() -> Value {
    load_fixture("hr_profile.json")
}

pub fn messy_profile() -> Value {
    load_fixture("messy_profile.json")
}
