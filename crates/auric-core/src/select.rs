//! Searchable dropdown control, rendering-agnostic.
//!
//! The widget owns its open/search/highlight state and exposes the behavior
//! contract; drawing and event plumbing live with the caller. Filtering is a
//! pure function so it can be property-tested in isolation.

use crate::dismiss::{DismissBus, DismissGuard, Region};

/// One entry in a searchable-select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    pub sub_label: Option<String>,
    pub icon: Option<String>,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sub_label: None,
            icon: None,
        }
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.sub_label = Some(sub_label.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Case-insensitive substring filter over both label and id.
///
/// An empty search matches every option. Filtering is idempotent: applying
/// the same search to its own result changes nothing.
pub fn filter_options<'a>(options: &'a [SelectOption], search: &str) -> Vec<&'a SelectOption> {
    let needle = search.trim().to_lowercase();
    options
        .iter()
        .filter(|option| {
            option.label.to_lowercase().contains(&needle)
                || option.id.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Dropdown state machine: shows a selected option, opens a filterable list
/// on demand, closes on outside pointer or selection.
pub struct SearchableSelect {
    options: Vec<SelectOption>,
    value: Option<String>,
    open: bool,
    search: String,
    highlighted: usize,
    guard: Option<DismissGuard>,
}

impl SearchableSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            value: None,
            open: false,
            search: String::new(),
            highlighted: 0,
            guard: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The option the current value refers to. A value that matches no
    /// option id yields `None` and the control renders blank.
    pub fn selected(&self) -> Option<&SelectOption> {
        let value = self.value.as_deref()?;
        self.options.iter().find(|option| option.id == value)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Open the list and subscribe to outside-pointer dismissal.
    pub fn open(&mut self, bus: &DismissBus, region: Region) {
        if self.open {
            return;
        }
        self.open = true;
        self.guard = Some(bus.register(region));
    }

    /// Close the list, clearing the search text and dropping the dismissal
    /// subscription.
    pub fn close(&mut self) {
        self.open = false;
        self.search.clear();
        self.highlighted = 0;
        self.guard = None;
    }

    pub fn toggle(&mut self, bus: &DismissBus, region: Region) {
        if self.open {
            self.close();
        } else {
            self.open(bus, region);
        }
    }

    /// Track the widget's latest rendered bounds while open.
    pub fn set_region(&mut self, region: Region) {
        if let Some(guard) = self.guard.as_mut() {
            guard.relocate(region);
        }
    }

    /// Close when a pointer interaction starts outside the control's bounds.
    /// Returns whether the control dismissed itself. The selection is never
    /// altered by dismissal.
    pub fn notify_pointer_down(&mut self, col: u16, row: u16) -> bool {
        let outside = match self.guard.as_ref() {
            Some(guard) => !guard.region().contains(col, row),
            None => false,
        };
        if self.open && outside {
            self.close();
            return true;
        }
        false
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.search.push(ch);
        self.highlighted = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.highlighted = 0;
    }

    pub fn filtered(&self) -> Vec<&SelectOption> {
        filter_options(&self.options, &self.search)
    }

    pub fn highlight_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 && self.highlighted + 1 < len {
            self.highlighted += 1;
        }
    }

    pub fn highlight_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Select the highlighted filtered option: commits the value, closes the
    /// list, clears the search, and returns the chosen id exactly once.
    /// Selection only happens from an open list.
    pub fn choose_highlighted(&mut self) -> Option<String> {
        if !self.open {
            return None;
        }
        let chosen = self
            .filtered()
            .get(self.highlighted)
            .map(|option| option.id.clone())?;
        self.value = Some(chosen.clone());
        self.close();
        Some(chosen)
    }

    /// Select a specific option id (pointer selection). Unknown ids are
    /// ignored and leave the control open.
    pub fn choose(&mut self, id: &str) -> Option<String> {
        if !self.open || !self.options.iter().any(|option| option.id == id) {
            return None;
        }
        self.value = Some(id.to_owned());
        self.close();
        Some(id.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency_options() -> Vec<SelectOption> {
        vec![
            SelectOption::new("USD", "USD - US Dollar").with_sub_label("Symbol: $"),
            SelectOption::new("EUR", "EUR - Euro"),
            SelectOption::new("INR", "INR - Indian Rupee"),
        ]
    }

    #[test]
    fn filter_matches_label_and_id_case_insensitively() {
        let options = currency_options();

        let by_label = filter_options(&options, "rupee");
        assert_eq!(by_label.len(), 1);
        assert_eq!(by_label[0].id, "INR");

        let by_id = filter_options(&options, "eur");
        assert_eq!(by_id.len(), 1);
    }

    #[test]
    fn empty_search_matches_everything() {
        let options = currency_options();
        assert_eq!(filter_options(&options, "").len(), options.len());
    }

    #[test]
    fn filtering_is_idempotent() {
        let options = currency_options();
        let once = filter_options(&options, "u")
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        let twice = filter_options(&once, "u")
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(once, twice);
    }

    #[test]
    fn choosing_commits_closes_and_clears_search() {
        let bus = DismissBus::new();
        let mut select = SearchableSelect::new(currency_options()).with_value("USD");

        select.open(&bus, Region::new(0, 0, 20, 8));
        select.push_search_char('e');
        let chosen = select.choose_highlighted().expect("one match");

        assert_eq!(chosen, "EUR");
        assert_eq!(select.value(), Some("EUR"));
        assert!(!select.is_open());
        assert_eq!(select.search(), "");
        assert_eq!(bus.active(), 0);
    }

    #[test]
    fn unknown_value_renders_blank_not_an_error() {
        let select = SearchableSelect::new(currency_options()).with_value("XYZ");
        assert!(select.selected().is_none());
    }

    #[test]
    fn empty_option_list_yields_no_results() {
        let mut select = SearchableSelect::new(Vec::new());
        assert!(select.filtered().is_empty());
        assert!(select.choose_highlighted().is_none());
    }

    #[test]
    fn outside_pointer_closes_without_changing_selection() {
        let bus = DismissBus::new();
        let mut select = SearchableSelect::new(currency_options()).with_value("USD");
        select.open(&bus, Region::new(10, 2, 20, 8));

        assert!(!select.notify_pointer_down(12, 4));
        assert!(select.is_open());

        assert!(select.notify_pointer_down(0, 0));
        assert!(!select.is_open());
        assert_eq!(select.value(), Some("USD"));
        assert_eq!(bus.active(), 0);
    }

    #[test]
    fn no_results_state_survives_more_typing() {
        let bus = DismissBus::new();
        let mut select = SearchableSelect::new(currency_options());
        select.open(&bus, Region::new(0, 0, 20, 8));

        for ch in "zz".chars() {
            select.push_search_char(ch);
        }
        assert!(select.filtered().is_empty());
        assert!(select.choose_highlighted().is_none());
        assert!(select.is_open());
    }
}
