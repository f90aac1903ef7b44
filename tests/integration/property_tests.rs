//! Property-based tests for normalization, resolution and matching.
//!
//! Generated record sets mix valid and invalid addresses, canonical and
//! lowercase type tags and every accepted flag form.

use email_reconciler::{
    EmailCollection, PreferredFlag, RawEmailRecord, Reconciler, ReconcilerConfig,
    ResolutionStatus, match_login, normalize, resolve_preferred,
};
use proptest::prelude::*;

/// A generated record plus whether its address is syntactically valid.
#[derive(Debug, Clone)]
struct GeneratedRecord {
    record: RawEmailRecord,
    valid: bool,
}

fn email_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("HOME".to_string()),
        Just("BUSINESS".to_string()),
        Just("work".to_string()),
        Just(" Campus ".to_string()),
        Just("LINKEDIN".to_string()),
    ]
}

fn valid_address() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,8}", "[a-z]{1,8}", prop_oneof![Just("com"), Just("edu"), Just("org")])
        .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
}

fn invalid_address() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,10}".prop_map(String::from),
        "[a-z]{1,5}".prop_map(|s| format!("{}@", s)),
        "[a-z]{1,5}".prop_map(|s| format!("@{}.com", s)),
        "[a-z]{1,5}".prop_map(|s| format!("{} {}@x.com", s, s)),
    ]
}

fn flag() -> impl Strategy<Value = Option<PreferredFlag>> {
    prop_oneof![
        Just(None),
        Just(Some(PreferredFlag::Yes)),
        Just(Some(PreferredFlag::No)),
        any::<bool>().prop_map(|b| Some(PreferredFlag::from(b))),
    ]
}

fn generated_record() -> impl Strategy<Value = GeneratedRecord> {
    let valid = (email_type(), valid_address(), flag(), "[ \t]{0,2}").prop_map(
        |(email_type, address, preferred_flag, pad)| GeneratedRecord {
            record: RawEmailRecord {
                email_type: Some(email_type),
                address: Some(format!("{}{}{}", pad, address, pad)),
                preferred_flag,
            },
            valid: true,
        },
    );
    let invalid = (email_type(), invalid_address(), flag()).prop_map(
        |(email_type, address, preferred_flag)| GeneratedRecord {
            record: RawEmailRecord {
                email_type: Some(email_type),
                address: Some(address),
                preferred_flag,
            },
            valid: false,
        },
    );
    prop_oneof![3 => valid, 1 => invalid]
}

fn generated_records() -> impl Strategy<Value = Vec<GeneratedRecord>> {
    prop::collection::vec(generated_record(), 0..12)
}

fn raw(generated: &[GeneratedRecord]) -> Vec<RawEmailRecord> {
    generated.iter().map(|g| g.record.clone()).collect()
}

proptest! {
    #[test]
    fn valid_records_survive_in_order(generated in generated_records()) {
        let normalized = normalize(&raw(&generated), &ReconcilerConfig::default());

        let expected: Vec<String> = generated
            .iter()
            .filter(|g| g.valid)
            .filter_map(|g| g.record.address.as_deref())
            .map(|a| a.trim().to_string())
            .collect();
        let actual: Vec<String> = normalized.collection.addresses().map(String::from).collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn exactly_invalid_records_are_rejected(generated in generated_records()) {
        let normalized = normalize(&raw(&generated), &ReconcilerConfig::default());

        let expected: Vec<usize> = generated
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.valid)
            .map(|(i, _)| i)
            .collect();
        let actual: Vec<usize> = normalized.diagnostics.rejected.iter().map(|r| r.index).collect();

        prop_assert_eq!(actual, expected);
        prop_assert_eq!(
            normalized.collection.len() + normalized.diagnostics.rejected_count(),
            generated.len()
        );
    }

    #[test]
    fn normalization_is_idempotent(generated in generated_records()) {
        let config = ReconcilerConfig::default();
        let once = normalize(&raw(&generated), &config);
        let twice = normalize(&once.collection.to_raw_records(), &config);

        prop_assert_eq!(&once.collection, &twice.collection);
        prop_assert!(twice.diagnostics.rejected.is_empty());
    }

    #[test]
    fn resolution_follows_flag_count(generated in generated_records()) {
        let result = Reconciler::default().reconcile(&raw(&generated));
        let collection: &EmailCollection = &result.validated_collection;
        let flagged = collection.flagged_preferred().len();

        let expected = match (collection.len(), flagged) {
            (0, _) => ResolutionStatus::Absent,
            (1, _) | (_, 1) => ResolutionStatus::Resolved,
            (_, 0) => ResolutionStatus::NoFlagSet,
            _ => ResolutionStatus::Ambiguous,
        };
        prop_assert_eq!(result.preferred.status(), expected);
        prop_assert_eq!(resolve_preferred(collection), result.preferred.clone());
    }

    #[test]
    fn every_entry_matches_itself(generated in generated_records(), pad in "[ \t]{0,3}") {
        let collection = normalize(&raw(&generated), &ReconcilerConfig::default()).collection;

        for entry in collection.iter() {
            let candidate = format!("{}{}{}", pad, entry.address(), pad);
            let result = match_login(&collection, &candidate);
            prop_assert!(result.matched);
            prop_assert_eq!(result.entry.map(|e| e.address()), Some(entry.address()));
        }
    }

    #[test]
    fn uppercased_candidates_do_not_match(generated in generated_records()) {
        let collection = normalize(&raw(&generated), &ReconcilerConfig::default()).collection;

        for entry in collection.iter() {
            let upper = entry.address().to_uppercase();
            prop_assume!(upper != entry.address());
            prop_assert!(!match_login(&collection, &upper).matched);
        }
    }
}
