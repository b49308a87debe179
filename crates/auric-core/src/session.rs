//! Valuation session: selection state, concurrent reloads, derived values.
//!
//! The session owns the metal/country/currency/weight selection, the latest
//! feed snapshots, and the two loading flags. A reload is split into three
//! phases so interactive callers can run the fetch on a spawned task:
//!
//! 1. [`ValuationSession::begin_reload`] — bump the generation, raise both
//!    loading flags, produce a [`ReloadTicket`].
//! 2. [`ValuationSession::fetch`] — join the two feed calls; neither cancels
//!    the other, and there is no ordering guarantee between them.
//! 3. [`ValuationSession::apply_reload`] — commit the outcome. Stale
//!    generations are dropped (last-triggered-wins), a price failure leaves
//!    prior data untouched, and both flags clear for the current generation.
//!
//! [`ValuationSession::reload`] composes the three for sequential callers.

use std::sync::Arc;

use crate::domain::reference;
use crate::feed::{PriceFeed, SourceError, SpotRequest, TaxFeed, TaxRequest};
use crate::{Country, Currency, MarketData, Metal, TaxInfo, Valuation};

/// In-flight reload handle carrying the generation and validated requests.
#[derive(Debug, Clone)]
pub struct ReloadTicket {
    generation: u64,
    pub spot: SpotRequest,
    pub tax: TaxRequest,
}

impl ReloadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Joint result of one reload's two feed calls.
#[derive(Debug, Clone)]
pub struct ReloadOutcome {
    generation: u64,
    pub market: Result<MarketData, SourceError>,
    pub tax: TaxInfo,
}

impl ReloadOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct ValuationSession {
    metal: Metal,
    country: Country,
    currency: Currency,
    weight_grams: f64,
    market_data: Option<MarketData>,
    tax_info: Option<TaxInfo>,
    price_loading: bool,
    tax_loading: bool,
    generation: u64,
    last_error: Option<SourceError>,
    price_feed: Arc<dyn PriceFeed>,
    tax_feed: Arc<dyn TaxFeed>,
}

impl ValuationSession {
    /// New session with the default selections: gold, the first reference
    /// country and currency, one gram.
    pub fn new(price_feed: Arc<dyn PriceFeed>, tax_feed: Arc<dyn TaxFeed>) -> Self {
        Self {
            metal: Metal::Gold,
            country: reference::default_country(),
            currency: reference::default_currency(),
            weight_grams: 1.0,
            market_data: None,
            tax_info: None,
            price_loading: false,
            tax_loading: false,
            generation: 0,
            last_error: None,
            price_feed,
            tax_feed,
        }
    }

    pub fn metal(&self) -> Metal {
        self.metal
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn weight_grams(&self) -> f64 {
        self.weight_grams
    }

    pub fn market_data(&self) -> Option<&MarketData> {
        self.market_data.as_ref()
    }

    pub fn tax_info(&self) -> Option<&TaxInfo> {
        self.tax_info.as_ref()
    }

    pub fn is_price_loading(&self) -> bool {
        self.price_loading
    }

    pub fn is_tax_loading(&self) -> bool {
        self.tax_loading
    }

    pub fn is_loading(&self) -> bool {
        self.price_loading || self.tax_loading
    }

    /// The price-feed failure from the most recent applied reload, if any.
    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    pub fn price_feed(&self) -> Arc<dyn PriceFeed> {
        Arc::clone(&self.price_feed)
    }

    pub fn tax_feed(&self) -> Arc<dyn TaxFeed> {
        Arc::clone(&self.tax_feed)
    }

    /// Switch metals. Returns whether a reload is required.
    pub fn set_metal(&mut self, metal: Metal) -> bool {
        if self.metal == metal {
            return false;
        }
        self.metal = metal;
        true
    }

    /// Select a country by name or ISO code. Unknown names are ignored.
    ///
    /// A change clears the previous tax estimate and raises the tax-loading
    /// flag immediately, so the view shows a recalculating indicator instead
    /// of a stale percentage. Returns whether a reload is required.
    pub fn select_country(&mut self, name: &str) -> bool {
        let Some(country) = reference::find_country(name) else {
            return false;
        };
        if country == self.country {
            return false;
        }
        self.country = country;
        self.tax_info = None;
        self.tax_loading = true;
        true
    }

    /// Select a display currency by code. Unknown codes are ignored.
    /// Returns whether a reload is required.
    pub fn select_currency(&mut self, code: &str) -> bool {
        let Some(currency) = reference::find_currency(code) else {
            return false;
        };
        if currency == self.currency {
            return false;
        }
        self.currency = currency;
        true
    }

    /// Update the weight. Clamped at zero; never triggers a reload — weight
    /// only feeds the local derived computation.
    pub fn set_weight_grams(&mut self, weight_grams: f64) {
        self.weight_grams = if weight_grams.is_finite() {
            weight_grams.max(0.0)
        } else {
            0.0
        };
    }

    /// Phase one of a reload: raises both loading flags and invalidates any
    /// reload still in flight.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.generation += 1;
        self.price_loading = true;
        self.tax_loading = true;
        ReloadTicket {
            generation: self.generation,
            spot: SpotRequest::for_currency(self.metal, &self.currency),
            tax: TaxRequest::for_country(self.metal, &self.country),
        }
    }

    /// Phase two: issue both requests back-to-back and await them jointly.
    /// A failure on one side never cancels the other.
    pub async fn fetch(
        price_feed: Arc<dyn PriceFeed>,
        tax_feed: Arc<dyn TaxFeed>,
        ticket: ReloadTicket,
    ) -> ReloadOutcome {
        let (market, tax) = tokio::join!(
            price_feed.spot(ticket.spot),
            tax_feed.estimate(ticket.tax)
        );
        ReloadOutcome {
            generation: ticket.generation,
            market,
            tax,
        }
    }

    /// Phase three: commit an outcome.
    ///
    /// Outcomes from a superseded generation are dropped entirely so a slow
    /// response can never overwrite a newer selection. For the current
    /// generation, success replaces both snapshots together; a price failure
    /// is logged and leaves prior data in place. Both loading flags clear
    /// either way. Returns whether the outcome was applied.
    pub fn apply_reload(&mut self, outcome: ReloadOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                "dropping stale reload outcome"
            );
            return false;
        }

        match outcome.market {
            Ok(market) => {
                self.market_data = Some(market);
                self.tax_info = Some(outcome.tax);
                self.last_error = None;
            }
            Err(error) => {
                tracing::warn!(error = %error, "spot price reload failed; keeping prior data");
                self.last_error = Some(error);
            }
        }

        self.price_loading = false;
        self.tax_loading = false;
        true
    }

    /// Full reload for sequential callers: begin, fetch, apply.
    pub async fn reload(&mut self) {
        let ticket = self.begin_reload();
        let outcome = Self::fetch(self.price_feed(), self.tax_feed(), ticket).await;
        self.apply_reload(outcome);
    }

    /// Manual refresh trigger. Disabled while a reload is already in flight;
    /// returns the ticket to fetch otherwise.
    pub fn refresh(&mut self) -> Option<ReloadTicket> {
        if self.is_loading() {
            return None;
        }
        Some(self.begin_reload())
    }

    /// Derived monetary breakdown for the current state. Pure; recomputed on
    /// every call.
    pub fn valuation(&self) -> Valuation {
        Valuation::compute(
            self.market_data.as_ref(),
            self.tax_info.as_ref(),
            self.weight_grams,
        )
    }
}
