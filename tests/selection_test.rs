mod common;

use common::{event_ids, events_with_deaths, events_with_years, ids, mixed_events, random_events};
use odie::core::engine::Engine;
use odie::core::error::ErrorKind;
use odie::search::sort::SortOrder;

#[test]
fn test_year_range_example() {
    let mut engine = Engine::load(events_with_years(&[1999, 2000, 2005, 2010, 2021])).unwrap();
    let selection = engine.filter_year_range(2000, 2010).unwrap();
    assert_eq!(ids(selection.ids()), vec![1, 2, 3]);
}

#[test]
fn test_year_range_matches_linear_scan() {
    for seed in 0..20 {
        let events = random_events(seed, 200);
        let engine = Engine::load(events.clone()).unwrap();
        for (low, high) in [(1960, 2024), (1990, 1990), (2000, 2010), (1800, 1900), (2024, 2100)] {
            let indexed: Vec<u32> = engine.indices().year_range(low, high).iter().collect();
            let scanned: Vec<u32> = events.iter()
                .enumerate()
                .filter(|(_, e)| e.start_year.is_some_and(|y| low <= y && y <= high))
                .map(|(i, _)| i as u32)
                .collect();
            assert_eq!(indexed, scanned, "seed {} range {}..={}", seed, low, high);
        }
    }
}

#[test]
fn test_categorical_filter_idempotent() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    let once = engine.filter_equals("country", "India").unwrap().clone();
    let twice = engine.filter_equals("country", "India").unwrap().clone();
    assert_eq!(once, twice);
    assert_eq!(ids(once.ids()), vec![0, 1, 3, 5, 7]);
}

#[test]
fn test_filters_commute() {
    let mut first = Engine::load(mixed_events()).unwrap();
    first.filter_equals("country", "India").unwrap();
    first.filter_equals("type", "Flood").unwrap();
    first.filter_year_range(1990, 2010).unwrap();

    let mut second = Engine::load(mixed_events()).unwrap();
    second.filter_year_range(1990, 2010).unwrap();
    second.filter_equals("type", "Flood").unwrap();
    second.filter_equals("country", "India").unwrap();

    assert!(first.selection().same_members(second.selection()));
    assert_eq!(ids(first.selection().ids()), vec![0]);
}

#[test]
fn test_unknown_value_gives_empty_selection() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    assert!(engine.filter_equals("country", "Atlantis").unwrap().is_empty());
    assert!(engine.filter_equals("country", "india").unwrap().is_empty());
}

#[test]
fn test_reset_returns_to_full_dataset() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    engine.filter_equals("country", "Chile").unwrap();
    assert_eq!(engine.reset().len(), 8);
}

#[test]
fn test_undo_redo_round_trip() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    let before = engine.selection().clone();
    let after = engine.filter_equals("type", "Earthquake").unwrap().clone();

    assert_eq!(engine.undo().unwrap(), &before);
    assert_eq!(engine.redo().unwrap(), &after);

    assert_eq!(engine.redo().unwrap_err().kind, ErrorKind::History);
    assert_eq!(engine.selection(), &after);
}

#[test]
fn test_undo_on_empty_history() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    let err = engine.undo().unwrap_err();
    assert_eq!(err.kind, ErrorKind::History);
    assert!(err.to_string().contains("nothing to undo"));
    assert_eq!(engine.selection().len(), 8);
}

#[test]
fn test_history_limit() {
    let config = odie::core::config::EngineConfig {
        history_limit: 2,
        ..Default::default()
    };
    let mut engine = Engine::with_config(mixed_events(), config).unwrap();
    engine.filter_year_range(1990, 2020).unwrap();
    engine.filter_equals("country", "India").unwrap();
    engine.filter_equals("type", "Flood").unwrap();

    engine.undo().unwrap();
    engine.undo().unwrap();
    assert_eq!(engine.undo().unwrap_err().kind, ErrorKind::History);
    // The oldest snapshot (full dataset) was dropped
    assert_eq!(engine.selection().len(), 7);
}

#[test]
fn test_topk_example() {
    let engine = Engine::load(events_with_deaths(&[Some(10), None, Some(50), Some(50), Some(5)])).unwrap();
    let top = engine.topk("deaths", 3).unwrap();
    assert_eq!(event_ids(&top), vec![2, 3, 0]);
}

#[test]
fn test_topk_with_huge_k_returns_whole_selection() {
    let engine = Engine::load(events_with_deaths(&[Some(10), Some(30)])).unwrap();
    let top = engine.topk("deaths", usize::MAX).unwrap();
    assert_eq!(event_ids(&top), vec![1, 0]);
}

#[test]
fn test_topk_matches_full_sort() {
    for seed in 0..10 {
        let mut engine = Engine::load(random_events(seed, 150)).unwrap();
        engine.filter_year_range(1970, 2020).unwrap();

        for k in [0, 1, 7, 40, 1000] {
            let top = event_ids(&engine.topk("deaths", k).unwrap());

            let mut present: Vec<(u64, u32)> = engine.events()
                .iter()
                .filter_map(|e| e.deaths.map(|d| (d, e.id.value())))
                .collect();
            present.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            let expected: Vec<u32> = present.iter().take(k).map(|(_, id)| *id).collect();

            assert_eq!(top, expected, "seed {} k {}", seed, k);
        }
    }
}

#[test]
fn test_sort_feeds_events_in_order() {
    let mut engine = Engine::load(mixed_events()).unwrap();
    engine.filter_equals("country", "India").unwrap();
    let sorted = event_ids(&engine.sort("deaths", SortOrder::Asc).unwrap());
    // Blank first, then 0, 300, 20000
    assert_eq!(sorted, vec![3, 5, 7, 0, 1]);
    assert_eq!(event_ids(&engine.events()), sorted);

    let sorted = event_ids(&engine.sort("deaths", SortOrder::Desc).unwrap());
    assert_eq!(sorted, vec![1, 0, 7, 3, 5]);
}
