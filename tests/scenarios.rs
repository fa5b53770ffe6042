//! End-to-end history view scenarios.

use chrono::{DateTime, Duration, TimeZone, Utc};
use history_view::{
    FilterCriteria, PageRequest, Record, RecordSource, SessionContext, StaticSource, ViewPipeline,
    ViewState, apply,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// 45 records, T1 newest, T45 oldest, shuffled in storage order.
fn forty_five() -> Vec<Record> {
    let mut records: Vec<Record> = (1..=45)
        .map(|i| {
            Record::new(format!("T{i}"))
                .at(base() - Duration::minutes(i))
                .with_text("message", format!("Entry T{i}"))
        })
        .collect();
    records.reverse();
    records.swap(3, 30);
    records
}

fn with_action(id: &str, action: &str, minutes: i64) -> Record {
    Record::new(id)
        .at(base() + Duration::minutes(minutes))
        .with_category("action", action)
}

#[test]
fn test_first_page_is_twenty_most_recent() {
    let records = forty_five();
    let page = apply(&records, &FilterCriteria::new(), &PageRequest::new(1, 20));

    assert_eq!(page.total_matching, 45);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<String> = page.items.iter().map(|r| r.id.clone()).collect();
    let expected: Vec<String> = (1..=20).map(|i| format!("T{i}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_login_search_is_literal_substring() {
    let records = vec![
        Record::new("by-category")
            .at(base())
            .with_category("action", "LOGIN")
            .with_text("message", "Session opened"),
        Record::new("by-text")
            .at(base())
            .with_category("action", "MODIFICATION")
            .with_text("message", "User attempted login"),
        Record::new("near-miss")
            .at(base())
            .with_category("action", "MODIFICATION")
            .with_text("message", "User logged in"),
    ];
    let page = apply(
        &records,
        &FilterCriteria::new().search("login"),
        &PageRequest::default(),
    );

    let mut ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["by-category", "by-text"]);
}

#[test]
fn test_selection_of_two_actions() {
    let mut records = Vec::new();
    for i in 0..10 {
        records.push(with_action(&format!("c{i}"), "CREATION", i));
    }
    for i in 0..5 {
        records.push(with_action(&format!("s{i}"), "SUPPRESSION", i));
    }
    for i in 0..8 {
        records.push(with_action(&format!("m{i}"), "MODIFICATION", i));
    }

    let criteria = FilterCriteria::new().with_selection("action", ["CREATION", "SUPPRESSION"]);
    let page = apply(&records, &criteria, &PageRequest::default());

    assert_eq!(page.total_matching, 15);
    assert!(
        page.items
            .iter()
            .all(|r| r.category("action") != Some("MODIFICATION"))
    );
}

#[test]
fn test_reset_action() {
    let mut state = ViewState::new(20);
    state.set_search_text("x");
    state.set_selection("action", ["CREATION"]);
    state.go_to_page(3);

    state.reset();

    assert_eq!(state.criteria.search_text, "");
    assert!(state.criteria.selections.is_empty());
    assert_eq!(state.page.page_number, 1);
}

#[test]
fn test_ties_keep_storage_order() {
    let records = vec![
        with_action("first", "CREATION", 0),
        with_action("second", "CREATION", 0),
        with_action("newer", "CREATION", 5),
        with_action("third", "CREATION", 0),
    ];
    let page = apply(&records, &FilterCriteria::new(), &PageRequest::default());
    let ids: Vec<&str> = page.items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "first", "second", "third"]);
}

#[test]
fn test_interaction_sequence() {
    let pipeline = ViewPipeline::new();
    let records = forty_five();
    let mut state = ViewState::new(20);

    let page = state.render(&pipeline, &records);
    state.next_page(page.total_pages);
    state.next_page(page.total_pages);
    state.next_page(page.total_pages);
    let page = state.render(&pipeline, &records);
    assert_eq!(page.page_number, 3);
    assert_eq!(page.caption(), "41–45 of 45");

    state.set_search_text("T4");
    let page = state.render(&pipeline, &records);
    // T4 and T40..T45
    assert_eq!(page.total_matching, 7);
    assert_eq!(page.page_number, 1);
    assert_eq!(page.items[0].id, "T4");
}

#[test]
fn test_reload_from_source_resets_view() {
    let pipeline = ViewPipeline::new();
    let session = SessionContext::anonymous();
    let mut state = ViewState::new(20);

    let first = StaticSource::new(forty_five()).load(&session).unwrap();
    state.set_search_text("T4");
    state.go_to_page(2);
    assert_eq!(state.render(&pipeline, &first).total_matching, 7);

    let replacement: Vec<Record> = (0..3)
        .map(|i| with_action(&format!("n{i}"), "LOGIN", i))
        .collect();
    let second = StaticSource::new(replacement).load(&session).unwrap();
    state.reload();

    let page = state.render(&pipeline, &second);
    assert_eq!(state.criteria, FilterCriteria::new());
    assert_eq!(page.page_number, 1);
    assert_eq!(page.total_matching, 3);
    assert_eq!(page.items[0].id, "n2");
}
