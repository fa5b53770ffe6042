//! Property tests for the pipeline's pagination and filtering laws.

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use history_view::{FilterCriteria, PageRequest, Record, apply};
use proptest::prelude::*;

const ACTIONS: [&str; 4] = ["CREATION", "MODIFICATION", "SUPPRESSION", "LOGIN"];
const WORDS: [&str; 5] = ["alpha", "beta", "login", "task", "Project"];

fn arb_record() -> impl Strategy<Value = Record> {
    (
        0u32..10_000,
        proptest::option::weighted(0.9, 0i64..50),
        proptest::option::weighted(0.8, 0usize..ACTIONS.len()),
        proptest::option::of(0usize..WORDS.len()),
    )
        .prop_map(|(id, minute, action, word)| {
            let mut record = Record::new(format!("r{id}"));
            if let Some(m) = minute {
                record = record.at(Utc.timestamp_opt(1_700_000_000 + m * 60, 0).unwrap());
            }
            if let Some(a) = action {
                record = record.with_category("action", ACTIONS[a]);
            }
            if let Some(w) = word {
                record = record.with_text("message", format!("{} entry", WORDS[w]));
            }
            record
        })
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec(arb_record(), 0..80)
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z ]{1,4}"],
        proptest::collection::btree_set(0usize..ACTIONS.len(), 0..3),
    )
        .prop_map(|(search, picks)| {
            let mut criteria = FilterCriteria::new().search(search);
            if !picks.is_empty() {
                criteria.select("action", picks.into_iter().map(|i| ACTIONS[i]));
            }
            criteria
        })
}

proptest! {
    #[test]
    fn test_page_never_exceeds_page_size(
        records in arb_records(),
        criteria in arb_criteria(),
        page_number in -5i64..12,
        page_size in 1usize..25,
    ) {
        let page = apply(&records, &criteria, &PageRequest::new(page_number, page_size));
        prop_assert!(page.items.len() <= page_size);
        prop_assert!(page.total_pages >= 1);
        if page.total_matching == 0 {
            prop_assert!(page.items.is_empty());
            prop_assert_eq!(page.total_pages, 1);
        }
    }

    #[test]
    fn test_pages_partition_the_matching_set(
        records in arb_records(),
        criteria in arb_criteria(),
        page_size in 1usize..15,
    ) {
        let everything = apply(&records, &criteria, &PageRequest::new(1, usize::MAX / 2));
        let first = apply(&records, &criteria, &PageRequest::new(1, page_size));

        let mut seen: Vec<*const Record> = Vec::new();
        for n in 1..=first.total_pages {
            let page = apply(&records, &criteria, &PageRequest::new(n as i64, page_size));
            seen.extend(page.items.iter().map(|r| *r as *const Record));
        }

        let expected: Vec<*const Record> =
            everything.items.iter().map(|r| *r as *const Record).collect();
        prop_assert_eq!(seen.len(), first.total_matching);
        prop_assert_eq!(&seen, &expected);
        let unique: BTreeSet<usize> = seen.iter().map(|p| *p as usize).collect();
        prop_assert_eq!(unique.len(), seen.len());
    }

    #[test]
    fn test_apply_is_idempotent(
        records in arb_records(),
        criteria in arb_criteria(),
        page_number in -3i64..6,
    ) {
        let request = PageRequest::new(page_number, 7);
        prop_assert_eq!(
            apply(&records, &criteria, &request),
            apply(&records, &criteria, &request)
        );
    }

    #[test]
    fn test_empty_search_only_applies_selections(
        records in arb_records(),
        criteria in arb_criteria(),
    ) {
        let categorical_only = FilterCriteria {
            search_text: String::new(),
            ..criteria
        };
        let page = apply(&records, &categorical_only, &PageRequest::default());
        let expected = records
            .iter()
            .filter(|r| categorical_only.matches_selections(r))
            .count();
        prop_assert_eq!(page.total_matching, expected);
    }

    #[test]
    fn test_empty_selection_is_neutral(
        records in arb_records(),
        criteria in arb_criteria(),
        field in prop_oneof![Just("action"), Just("entity"), Just("status")],
    ) {
        let mut widened = criteria.clone();
        if widened.selections.contains_key(field) {
            return Ok(());
        }
        widened.select(field, Vec::<String>::new());

        let request = PageRequest::new(2, 5);
        prop_assert_eq!(
            apply(&records, &criteria, &request),
            apply(&records, &widened, &request)
        );
    }

    #[test]
    fn test_requested_page_is_clamped(
        records in arb_records(),
        page_number in any::<i64>(),
        page_size in 1usize..30,
    ) {
        let page = apply(&records, &FilterCriteria::new(), &PageRequest::new(page_number, page_size));
        prop_assert!(page.page_number >= 1);
        prop_assert!(page.page_number <= page.total_pages);
        if page_number < 1 {
            prop_assert_eq!(page.page_number, 1);
        } else if page_number as u64 > page.total_pages as u64 {
            prop_assert_eq!(page.page_number, page.total_pages);
        } else {
            prop_assert_eq!(page.page_number as i64, page_number);
        }
    }

    #[test]
    fn test_results_are_sorted_most_recent_first(
        records in arb_records(),
        criteria in arb_criteria(),
    ) {
        let page = apply(&records, &criteria, &PageRequest::new(1, 1_000));
        for pair in page.items.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }
}
