//! Behavior-driven tests for the searchable select control.
//!
//! These tests verify filtering exactness, the selection lifecycle, and
//! outside-pointer dismissal with guaranteed subscription cleanup.

use auric_core::{filter_options, DismissBus, Region, SearchableSelect, SelectOption};

fn sample_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("India", "India").with_icon("🇮🇳"),
        SelectOption::new("United States", "United States").with_icon("🇺🇸"),
        SelectOption::new("United Kingdom", "United Kingdom").with_icon("🇬🇧"),
        SelectOption::new("Singapore", "Singapore").with_icon("🇸🇬"),
    ]
}

// =============================================================================
// Option Filter: Exactness and Idempotence
// =============================================================================

#[test]
fn filter_returns_exactly_the_case_insensitive_matches() {
    let options = sample_options();

    // When: filtering on a fragment that appears in two labels
    let filtered = filter_options(&options, "united");

    // Then: the result is exactly the matching subset, in order
    let ids = filtered
        .iter()
        .map(|option| option.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["United States", "United Kingdom"]);

    // And: every excluded option genuinely does not match
    for option in &options {
        let matches = option.label.to_lowercase().contains("united")
            || option.id.to_lowercase().contains("united");
        assert_eq!(matches, ids.contains(&option.id.as_str()));
    }
}

#[test]
fn filtering_twice_with_the_same_search_is_idempotent() {
    let options = sample_options();

    let once = filter_options(&options, "in")
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let twice = filter_options(&once, "in")
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();

    assert_eq!(once, twice);
}

#[test]
fn empty_search_matches_every_option() {
    let options = sample_options();
    assert_eq!(filter_options(&options, "").len(), options.len());
}

#[test]
fn filter_also_matches_against_ids() {
    let options = vec![
        SelectOption::new("USD", "US Dollar"),
        SelectOption::new("EUR", "Euro"),
    ];

    let filtered = filter_options(&options, "usd");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "USD");
}

// =============================================================================
// Searchable Select: Selection Lifecycle
// =============================================================================

#[test]
fn when_an_option_is_chosen_the_control_commits_closes_and_clears() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options()).with_value("India");
    select.open(&bus, Region::new(0, 0, 30, 10));

    for ch in "singa".chars() {
        select.push_search_char(ch);
    }
    let chosen = select.choose_highlighted();

    // The chosen id is reported exactly once, then state resets.
    assert_eq!(chosen.as_deref(), Some("Singapore"));
    assert_eq!(select.value(), Some("Singapore"));
    assert!(!select.is_open());
    assert_eq!(select.search(), "");

    // A second attempt on the now-closed control fires nothing.
    assert!(select.choose_highlighted().is_none());
    assert_eq!(select.value(), Some("Singapore"));
}

#[test]
fn when_the_value_matches_no_option_the_control_renders_blank() {
    let select = SearchableSelect::new(sample_options()).with_value("Narnia");
    assert!(select.selected().is_none());
}

#[test]
fn an_empty_option_list_is_rendered_gracefully() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(Vec::new());
    select.open(&bus, Region::new(0, 0, 30, 10));

    assert!(select.filtered().is_empty());
    assert!(select.choose_highlighted().is_none());
    assert!(select.is_open());
}

#[test]
fn a_search_with_no_matches_shows_the_no_results_state() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options());
    select.open(&bus, Region::new(0, 0, 30, 10));

    for ch in "zzz".chars() {
        select.push_search_char(ch);
    }

    assert!(select.filtered().is_empty());
    assert!(select.is_open());
}

#[test]
fn highlight_navigation_is_clamped_to_the_filtered_list() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options());
    select.open(&bus, Region::new(0, 0, 30, 10));

    for _ in 0..20 {
        select.highlight_down();
    }
    assert_eq!(select.highlighted(), sample_options().len() - 1);

    for _ in 0..20 {
        select.highlight_up();
    }
    assert_eq!(select.highlighted(), 0);
}

// =============================================================================
// Searchable Select: Outside-Pointer Dismissal
// =============================================================================

#[test]
fn a_pointer_down_outside_the_control_closes_without_changing_selection() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options()).with_value("India");
    select.open(&bus, Region::new(10, 5, 30, 12));
    select.push_search_char('u');

    // Inside: stays open.
    assert!(!select.notify_pointer_down(15, 8));
    assert!(select.is_open());

    // Outside: closes, clears the search, keeps the selection.
    assert!(select.notify_pointer_down(0, 0));
    assert!(!select.is_open());
    assert_eq!(select.search(), "");
    assert_eq!(select.value(), Some("India"));
}

#[test]
fn closing_releases_the_dismiss_subscription() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options());

    select.open(&bus, Region::new(0, 0, 20, 8));
    assert_eq!(bus.active(), 1);

    select.close();
    assert_eq!(bus.active(), 0);
}

#[test]
fn teardown_of_an_open_control_releases_the_subscription() {
    let bus = DismissBus::new();
    {
        let mut select = SearchableSelect::new(sample_options());
        select.open(&bus, Region::new(0, 0, 20, 8));
        assert_eq!(bus.active(), 1);
        // The control is dropped while still open.
    }
    assert_eq!(bus.active(), 0);
}

#[test]
fn reopening_tracks_the_latest_rendered_region() {
    let bus = DismissBus::new();
    let mut select = SearchableSelect::new(sample_options());
    select.open(&bus, Region::new(0, 0, 10, 3));

    // The view re-renders the dropdown at a larger overlay.
    select.set_region(Region::new(0, 0, 10, 12));

    assert!(!select.notify_pointer_down(5, 10));
    assert!(select.is_open());
}
