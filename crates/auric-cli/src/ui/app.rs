use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use auric_core::domain::reference;
use auric_core::{
    DismissBus, FeedSet, Metal, Region, ReloadTicket, SearchableSelect, SelectOption,
    ValuationSession,
};

use crate::cli::{ThemeArg, WatchArgs};

use super::events::UiEvent;
use super::theme::Theme;

/// Which control receives keyboard input when no dropdown is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Metal,
    Country,
    Currency,
    Weight,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Metal => Self::Country,
            Self::Country => Self::Currency,
            Self::Currency => Self::Weight,
            Self::Weight => Self::Metal,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Metal => Self::Weight,
            Self::Country => Self::Metal,
            Self::Currency => Self::Country,
            Self::Weight => Self::Currency,
        }
    }
}

/// Dashboard state: the valuation session plus the interactive controls.
pub struct WatchApp {
    pub session: ValuationSession,
    pub country_select: SearchableSelect,
    pub currency_select: SearchableSelect,
    pub dismiss_bus: DismissBus,
    pub weight_input: String,
    pub focus: Focus,
    pub theme: Theme,
    events_tx: mpsc::UnboundedSender<UiEvent>,
    should_quit: bool,

    // Hit-testing targets refreshed by the view on every draw.
    pub metal_area: Option<Region>,
    pub country_area: Option<Region>,
    pub currency_area: Option<Region>,
    pub weight_area: Option<Region>,
    pub country_items_area: Option<Region>,
    pub currency_items_area: Option<Region>,
}

fn country_options() -> Vec<SelectOption> {
    reference::COUNTRIES
        .iter()
        .map(|country| {
            SelectOption::new(country.name, country.name)
                .with_icon(country.flag)
                .with_sub_label("Market Region")
        })
        .collect()
}

fn currency_options() -> Vec<SelectOption> {
    reference::SUPPORTED_CURRENCIES
        .iter()
        .map(|currency| {
            let mut option = SelectOption::new(
                currency.code,
                format!("{} - {}", currency.code, currency.name),
            )
            .with_sub_label(format!("Symbol: {}", currency.symbol));
            if let Some(flag) = currency.flag {
                option = option.with_icon(flag);
            }
            option
        })
        .collect()
}

impl WatchApp {
    pub fn new(feeds: FeedSet, args: &WatchArgs, events_tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        let mut session = ValuationSession::new(feeds.price, feeds.tax);
        session.set_metal(args.metal.into());
        session.select_country(&args.country);
        session.select_currency(&args.currency);
        session.set_weight_grams(args.weight_grams);

        let country_select =
            SearchableSelect::new(country_options()).with_value(session.country().name);
        let currency_select =
            SearchableSelect::new(currency_options()).with_value(session.currency().code);

        let theme = match args.theme {
            ThemeArg::Dark => Theme::dark(),
            ThemeArg::Light => Theme::light(),
        };

        Self {
            session,
            country_select,
            currency_select,
            dismiss_bus: DismissBus::new(),
            weight_input: format_weight(args.weight_grams.max(0.0)),
            focus: Focus::Metal,
            theme,
            events_tx,
            should_quit: false,
            metal_area: None,
            country_area: None,
            currency_area: None,
            weight_area: None,
            country_items_area: None,
            currency_items_area: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Fire a reload and post its outcome back through the event channel.
    pub fn trigger_reload(&mut self) {
        let ticket = self.session.begin_reload();
        self.spawn_fetch(ticket);
    }

    fn spawn_fetch(&self, ticket: ReloadTicket) {
        let price_feed = self.session.price_feed();
        let tax_feed = self.session.tax_feed();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = ValuationSession::fetch(price_feed, tax_feed, ticket).await;
            let _ = events_tx.send(UiEvent::Reload(outcome));
        });
    }

    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Reload(outcome) => {
                self.session.apply_reload(outcome);
            }
            UiEvent::Tick => {}
            UiEvent::PointerDown(col, row) => self.handle_pointer_down(col, row),
            UiEvent::Key(key) => self.handle_key(key),
        }
    }

    fn handle_pointer_down(&mut self, col: u16, row: u16) {
        // Clicks inside an open list select the hit entry before any
        // dismissal bookkeeping runs.
        if self.country_select.is_open() {
            if let Some(index) = item_index(self.country_items_area, col, row) {
                let chosen = self
                    .country_select
                    .filtered()
                    .get(index)
                    .map(|option| option.id.clone());
                if let Some(id) = chosen {
                    self.country_select.choose(&id);
                    if self.session.select_country(&id) {
                        self.trigger_reload();
                    }
                }
                return;
            }
        }
        if self.currency_select.is_open() {
            if let Some(index) = item_index(self.currency_items_area, col, row) {
                let chosen = self
                    .currency_select
                    .filtered()
                    .get(index)
                    .map(|option| option.id.clone());
                if let Some(id) = chosen {
                    self.currency_select.choose(&id);
                    if self.session.select_currency(&id) {
                        self.trigger_reload();
                    }
                }
                return;
            }
        }

        let country_dismissed = self.country_select.notify_pointer_down(col, row);
        let currency_dismissed = self.currency_select.notify_pointer_down(col, row);
        if country_dismissed || currency_dismissed {
            return;
        }

        if hits(self.country_area, col, row) {
            self.focus = Focus::Country;
            let region = self.country_area.unwrap_or(Region::new(0, 0, 0, 0));
            self.country_select.toggle(&self.dismiss_bus, region);
        } else if hits(self.currency_area, col, row) {
            self.focus = Focus::Currency;
            let region = self.currency_area.unwrap_or(Region::new(0, 0, 0, 0));
            self.currency_select.toggle(&self.dismiss_bus, region);
        } else if hits(self.metal_area, col, row) {
            self.focus = Focus::Metal;
            if let Some(area) = self.metal_area {
                let midpoint = area.x + area.width / 2;
                let metal = if col < midpoint {
                    Metal::Gold
                } else {
                    Metal::Silver
                };
                if self.session.set_metal(metal) {
                    self.trigger_reload();
                }
            }
        } else if hits(self.weight_area, col, row) {
            self.focus = Focus::Weight;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => self.theme = self.theme.toggled(),
                KeyCode::Char('r') => {
                    // Manual refresh is disabled while a reload is in flight.
                    if let Some(ticket) = self.session.refresh() {
                        self.spawn_fetch(ticket);
                    }
                }
                _ => {}
            }
            return;
        }

        if self.country_select.is_open() {
            if let Some(id) = Self::handle_open_select_key(key, &mut self.country_select) {
                if self.session.select_country(&id) {
                    self.trigger_reload();
                }
            }
            return;
        }
        if self.currency_select.is_open() {
            if let Some(id) = Self::handle_open_select_key(key, &mut self.currency_select) {
                if self.session.select_currency(&id) {
                    self.trigger_reload();
                }
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Enter => match self.focus {
                Focus::Country => {
                    let region = self.country_area.unwrap_or(Region::new(0, 0, 0, 0));
                    self.country_select.open(&self.dismiss_bus, region);
                }
                Focus::Currency => {
                    let region = self.currency_area.unwrap_or(Region::new(0, 0, 0, 0));
                    self.currency_select.open(&self.dismiss_bus, region);
                }
                Focus::Metal => {
                    let metal = self.session.metal().other();
                    if self.session.set_metal(metal) {
                        self.trigger_reload();
                    }
                }
                Focus::Weight => {}
            },
            KeyCode::Left | KeyCode::Right if self.focus == Focus::Metal => {
                let metal = match key.code {
                    KeyCode::Left => Metal::Gold,
                    _ => Metal::Silver,
                };
                if self.session.set_metal(metal) {
                    self.trigger_reload();
                }
            }
            KeyCode::Char(ch) if self.focus == Focus::Weight => {
                if ch.is_ascii_digit() || (ch == '.' && !self.weight_input.contains('.')) {
                    self.weight_input.push(ch);
                    self.sync_weight();
                }
            }
            KeyCode::Backspace if self.focus == Focus::Weight => {
                self.weight_input.pop();
                self.sync_weight();
            }
            _ => {}
        }
    }

    /// Keys routed to whichever dropdown is open. Returns the chosen option
    /// id when a selection was committed.
    fn handle_open_select_key(key: KeyEvent, select: &mut SearchableSelect) -> Option<String> {
        match key.code {
            KeyCode::Esc => {
                select.close();
                None
            }
            KeyCode::Down => {
                select.highlight_down();
                None
            }
            KeyCode::Up => {
                select.highlight_up();
                None
            }
            KeyCode::Enter => select.choose_highlighted(),
            KeyCode::Backspace => {
                select.pop_search_char();
                None
            }
            KeyCode::Char(ch) => {
                select.push_search_char(ch);
                None
            }
            _ => None,
        }
    }

    /// Weight changes only touch the local derived computation; no reload.
    fn sync_weight(&mut self) {
        let parsed = self.weight_input.parse::<f64>().unwrap_or(0.0);
        self.session.set_weight_grams(parsed);
    }
}

fn hits(area: Option<Region>, col: u16, row: u16) -> bool {
    area.is_some_and(|region| region.contains(col, row))
}

/// Map a pointer location inside a dropdown's item area to a filtered index.
fn item_index(area: Option<Region>, col: u16, row: u16) -> Option<usize> {
    let area = area?;
    if !area.contains(col, row) {
        return None;
    }
    Some(usize::from(row - area.y))
}

fn format_weight(weight: f64) -> String {
    if weight == weight.trunc() {
        format!("{}", weight as i64)
    } else {
        format!("{weight}")
    }
}
