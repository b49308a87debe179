use serde::Serialize;

use super::models::{MarketData, TaxInfo};

/// Grams in one troy ounce, the unit spot prices are quoted in.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.103_476_8;

/// Derived monetary breakdown for a weight of metal at the current spot price.
///
/// Never stored: recomputed from `(MarketData, TaxInfo, weight)` on demand.
/// Every component degrades to zero while its source is absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    pub price_per_gram: f64,
    pub base_value: f64,
    pub tax_rate_percent: f64,
    pub tax_value: f64,
    pub final_value: f64,
}

impl Valuation {
    /// Pure derivation; no side effects, no caching.
    ///
    /// Negative weights are clamped to zero before any arithmetic.
    pub fn compute(
        market: Option<&MarketData>,
        tax: Option<&TaxInfo>,
        weight_grams: f64,
    ) -> Self {
        let weight = if weight_grams.is_finite() {
            weight_grams.max(0.0)
        } else {
            0.0
        };

        let price_per_ounce = market.map_or(0.0, |data| data.price);
        let price_per_gram = price_per_ounce / GRAMS_PER_TROY_OUNCE;

        let base_value = price_per_gram * weight;
        let tax_rate_percent = tax.map_or(0.0, |info| info.percentage);
        let tax_value = base_value * (tax_rate_percent / 100.0);
        let final_value = base_value + tax_value;

        Self {
            price_per_gram,
            base_value,
            tax_rate_percent,
            tax_value,
            final_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Metal;

    fn market(price: f64) -> MarketData {
        MarketData::new(Metal::Gold, price, 0.0, 0.0, "12:00:00 UTC", "USD")
            .expect("valid market data")
    }

    #[test]
    fn derives_the_documented_scenario() {
        let data = market(2000.0);
        let tax = TaxInfo::new(10.0, "India").expect("valid tax");

        let valuation = Valuation::compute(Some(&data), Some(&tax), 10.0);

        assert!((valuation.price_per_gram - 64.301).abs() < 0.001);
        assert!((valuation.base_value - 643.01).abs() < 0.01);
        assert!((valuation.tax_value - 64.30).abs() < 0.01);
        assert!((valuation.final_value - 707.31).abs() < 0.01);
    }

    #[test]
    fn absent_sources_degrade_to_zero() {
        let valuation = Valuation::compute(None, None, 100.0);
        assert_eq!(valuation.base_value, 0.0);
        assert_eq!(valuation.tax_value, 0.0);
        assert_eq!(valuation.final_value, 0.0);
    }

    #[test]
    fn negative_weight_is_clamped() {
        let data = market(2000.0);
        let valuation = Valuation::compute(Some(&data), None, -5.0);
        assert_eq!(valuation.base_value, 0.0);
        assert_eq!(valuation.final_value, 0.0);
    }

    #[test]
    fn final_value_never_undercuts_base_value() {
        let data = market(1850.25);
        for rate in [0.0, 3.0, 12.5, 140.0] {
            let tax = TaxInfo::new(rate, "Testland").expect("valid tax");
            let valuation = Valuation::compute(Some(&data), Some(&tax), 7.5);
            assert!(valuation.final_value >= valuation.base_value);
        }
    }
}
