//! Preference policy unit tests.

use crate::common::collection;
use email_reconciler::{EmailEntry, EmailType, FirstEntryPolicy, PreferencePolicy, TypePriorityPolicy};

fn candidates() -> Vec<EmailEntry> {
    collection(&[
        (EmailType::HOME, "home1@x.com", false),
        (EmailType::CAMPUS, "campus@x.edu", false),
        (EmailType::HOME, "home2@x.com", false),
        (EmailType::BUSINESS, "work@x.com", false),
    ])
    .into_iter()
    .collect()
}

fn chosen<P: PreferencePolicy>(policy: &P, candidates: &[EmailEntry]) -> Option<String> {
    policy.choose(candidates).map(|e| e.address().to_string())
}

#[test]
fn test_first_entry_policy() {
    assert_eq!(chosen(&FirstEntryPolicy, &candidates()), Some("home1@x.com".to_string()));
    assert_eq!(chosen(&FirstEntryPolicy, &[]), None);
}

#[test]
fn test_priority_order_wins_over_source_order() {
    let policy = TypePriorityPolicy::new(vec![EmailType::BUSINESS, EmailType::CAMPUS]);
    assert_eq!(chosen(&policy, &candidates()), Some("work@x.com".to_string()));
}

#[test]
fn test_same_tag_falls_back_to_source_order() {
    let policy = TypePriorityPolicy::new(vec![EmailType::HOME]);
    assert_eq!(chosen(&policy, &candidates()), Some("home1@x.com".to_string()));
}

#[test]
fn test_unlisted_tags_never_chosen() {
    let policy = TypePriorityPolicy::new(vec![EmailType::LINKEDIN]);
    assert_eq!(chosen(&policy, &candidates()), None);
    assert_eq!(chosen(&TypePriorityPolicy::default(), &candidates()), None);
}

#[test]
fn test_priority_from_json() {
    let policy: TypePriorityPolicy = serde_json::from_str(r#"["campus", "HOME"]"#).unwrap();

    assert_eq!(policy.priority(), &[EmailType::CAMPUS, EmailType::HOME]);
    assert_eq!(chosen(&policy, &candidates()), Some("campus@x.edu".to_string()));
}

#[test]
fn test_boxed_policy_objects() {
    let policies: Vec<Box<dyn PreferencePolicy>> = vec![
        Box::new(FirstEntryPolicy),
        Box::new(TypePriorityPolicy::new(vec![EmailType::BUSINESS])),
    ];
    let picks: Vec<_> = policies
        .iter()
        .map(|policy| policy.choose(&candidates()).map(|e| e.address().to_string()))
        .collect();

    assert_eq!(
        picks,
        vec![Some("home1@x.com".to_string()), Some("work@x.com".to_string())]
    );
}
