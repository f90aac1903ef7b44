//! Preferred resolution unit tests.

use crate::common::collection;
use crate::{assert_resolved, assert_status};
use email_reconciler::{
    EmailCollection, EmailType, FirstEntryPolicy, PreferredResolution, TypePriorityPolicy,
    resolve_preferred,
};
use serde_json::json;

#[test]
fn test_single_unflagged_entry_is_promoted() {
    let emails = collection(&[(EmailType::HOME, "a@x.com", false)]);
    let resolution = resolve_preferred(&emails);

    assert_eq!(
        resolution,
        PreferredResolution::Resolved {
            address: "a@x.com".to_string(),
            auto_promoted: true,
        }
    );
}

#[test]
fn test_single_flagged_entry_is_not_marked_promoted() {
    let emails = collection(&[(EmailType::LINKEDIN, "a@x.com", true)]);
    let resolution = resolve_preferred(&emails);

    assert_resolved!(resolution, "a@x.com");
    assert!(matches!(
        resolution,
        PreferredResolution::Resolved {
            auto_promoted: false,
            ..
        }
    ));
}

#[test]
fn test_empty_collection_is_absent() {
    let resolution = resolve_preferred(&EmailCollection::empty());
    assert_status!(resolution, Absent);
    assert_eq!(resolution.address(), None);
    assert!(resolution.conflicts().is_empty());
}

#[test]
fn test_one_flag_among_many() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", false),
        (EmailType::BUSINESS, "b@x.com", true),
        (EmailType::CAMPUS, "c@x.edu", false),
    ]);
    assert_resolved!(resolve_preferred(&emails), "b@x.com");
}

#[test]
fn test_two_flags_are_ambiguous() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", true),
        (EmailType::BUSINESS, "b@x.com", true),
    ]);
    let resolution = resolve_preferred(&emails);

    assert_status!(resolution, Ambiguous);
    assert_eq!(resolution.conflicts(), emails.entries());
    assert_eq!(resolution.address(), None);
}

#[test]
fn test_conflicts_exclude_unflagged_entries() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", true),
        (EmailType::WORK, "w@x.com", false),
        (EmailType::BUSINESS, "b@x.com", true),
    ]);
    let resolution = resolve_preferred(&emails);

    let conflicts: Vec<_> = resolution.conflicts().iter().map(|e| e.address()).collect();
    assert_eq!(conflicts, vec!["a@x.com", "b@x.com"]);
}

#[test]
fn test_no_flags_among_many() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", false),
        (EmailType::BUSINESS, "b@x.com", false),
    ]);
    let resolution = resolve_preferred(&emails);

    assert_status!(resolution, NoFlagSet);
    assert!(!resolution.is_resolved());
}

#[test]
fn test_wire_shapes() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", true),
        (EmailType::BUSINESS, "b@x.com", true),
    ]);

    assert_eq!(
        serde_json::to_value(resolve_preferred(&emails)).unwrap(),
        json!({
            "status": "ambiguous",
            "conflicts": [
                {"type": "HOME", "address": "a@x.com", "isPreferred": true},
                {"type": "BUSINESS", "address": "b@x.com", "isPreferred": true}
            ]
        })
    );
    assert_eq!(
        serde_json::to_value(PreferredResolution::NoFlagSet).unwrap(),
        json!({"status": "no-flag-set"})
    );
    assert_eq!(
        serde_json::to_value(resolve_preferred(&collection(&[(EmailType::HOME, "a@x.com", true)])))
            .unwrap(),
        json!({"status": "resolved", "address": "a@x.com", "autoPromoted": false})
    );
}

#[test]
fn test_resolution_round_trips_through_json() {
    let resolution = PreferredResolution::Resolved {
        address: "a@x.com".to_string(),
        auto_promoted: true,
    };
    let text = serde_json::to_string(&resolution).unwrap();
    let back: PreferredResolution = serde_json::from_str(&text).unwrap();
    assert_eq!(back, resolution);
}

#[test]
fn test_policy_fills_no_flag_set() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", false),
        (EmailType::BUSINESS, "b@x.com", false),
    ]);
    let resolution = resolve_preferred(&emails);
    let policy = TypePriorityPolicy::new(vec![EmailType::BUSINESS, EmailType::HOME]);

    assert_eq!(resolution.apply_policy(&emails, &policy, false), Some("b@x.com"));
    assert_eq!(resolution.apply_policy(&emails, &FirstEntryPolicy, false), Some("a@x.com"));
}

#[test]
fn test_policy_breaks_ties_only_when_asked() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", true),
        (EmailType::WORK, "w@x.com", false),
        (EmailType::BUSINESS, "b@x.com", true),
    ]);
    let resolution = resolve_preferred(&emails);
    let policy = TypePriorityPolicy::new(vec![EmailType::WORK, EmailType::BUSINESS]);

    assert_eq!(resolution.apply_policy(&emails, &policy, false), None);
    // Only conflicting entries are candidates, so WORK is never picked.
    assert_eq!(resolution.apply_policy(&emails, &policy, true), Some("b@x.com"));
}

#[test]
fn test_policy_leaves_resolved_and_absent_alone() {
    let emails = collection(&[
        (EmailType::HOME, "a@x.com", true),
        (EmailType::BUSINESS, "b@x.com", false),
    ]);
    let policy = TypePriorityPolicy::new(vec![EmailType::BUSINESS]);

    assert_eq!(
        resolve_preferred(&emails).apply_policy(&emails, &policy, true),
        Some("a@x.com")
    );

    let empty = EmailCollection::empty();
    assert_eq!(
        resolve_preferred(&empty).apply_policy(&empty, &FirstEntryPolicy, true),
        None
    );
}
