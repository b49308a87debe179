//! Behavior-driven tests for the derived valuation math.
//!
//! These tests verify the pure derivation from (market data, tax estimate,
//! weight) down to base, tax, and final values.

use auric_core::{MarketData, Metal, TaxInfo, Valuation, GRAMS_PER_TROY_OUNCE};
use auric_tests::market_at;

// =============================================================================
// Valuation: Documented Scenarios
// =============================================================================

#[test]
fn when_gold_is_2000_per_ounce_ten_grams_at_ten_percent_totals_707() {
    // Given: a 2000/oz spot price and a 10% regional tax
    let market = market_at(2000.0);
    let tax = TaxInfo::new(10.0, "India").expect("valid tax");

    // When: valuing 10 grams
    let valuation = Valuation::compute(Some(&market), Some(&tax), 10.0);

    // Then: the documented breakdown falls out of the derivation
    assert!((valuation.price_per_gram - 64.301).abs() < 0.001);
    assert!((valuation.base_value - 643.01).abs() < 0.01);
    assert!((valuation.tax_value - 64.30).abs() < 0.01);
    assert!((valuation.final_value - 707.31).abs() < 0.01);
}

#[test]
fn when_weight_is_zero_every_component_is_zero() {
    let market = market_at(2417.80);
    let tax = TaxInfo::new(33.0, "India").expect("valid tax");

    let valuation = Valuation::compute(Some(&market), Some(&tax), 0.0);

    assert_eq!(valuation.base_value, 0.0);
    assert_eq!(valuation.tax_value, 0.0);
    assert_eq!(valuation.final_value, 0.0);
}

#[test]
fn when_tax_lookup_degrades_to_zero_final_equals_base_exactly() {
    // Given: the tax collaborator answered its 0% fallback
    let market = market_at(1893.40);
    let tax = TaxInfo::fallback("Atlantis");

    let valuation = Valuation::compute(Some(&market), Some(&tax), 4.2);

    assert_eq!(valuation.tax_value, 0.0);
    assert_eq!(valuation.final_value, valuation.base_value);
}

// =============================================================================
// Valuation: Invariants
// =============================================================================

#[test]
fn final_value_is_never_below_base_value() {
    let market = market_at(2104.33);

    for rate in [0.0, 0.5, 7.0, 18.0, 33.0, 120.0] {
        let tax = TaxInfo::new(rate, "Testland").expect("valid tax");
        for weight in [0.0, 0.001, 1.0, 10.0, 2500.0] {
            let valuation = Valuation::compute(Some(&market), Some(&tax), weight);
            assert!(
                valuation.final_value >= valuation.base_value,
                "rate={rate} weight={weight}"
            );
        }
    }
}

#[test]
fn negative_weight_is_clamped_before_derivation() {
    let market = market_at(2000.0);
    let tax = TaxInfo::new(10.0, "India").expect("valid tax");

    let valuation = Valuation::compute(Some(&market), Some(&tax), -12.0);

    assert_eq!(valuation.base_value, 0.0);
    assert_eq!(valuation.final_value, 0.0);
}

#[test]
fn missing_sources_independently_degrade_to_zero() {
    let market = market_at(2000.0);
    let tax = TaxInfo::new(18.0, "India").expect("valid tax");

    // No market data: everything monetary is zero even with a tax estimate.
    let without_market = Valuation::compute(None, Some(&tax), 10.0);
    assert_eq!(without_market.base_value, 0.0);
    assert_eq!(without_market.final_value, 0.0);

    // No tax estimate: base survives, surcharge is zero.
    let without_tax = Valuation::compute(Some(&market), None, 10.0);
    assert!(without_tax.base_value > 0.0);
    assert_eq!(without_tax.tax_value, 0.0);
    assert_eq!(without_tax.final_value, without_tax.base_value);
}

#[test]
fn price_per_gram_uses_the_troy_ounce_constant() {
    let market = MarketData::new(
        Metal::Silver,
        GRAMS_PER_TROY_OUNCE,
        0.0,
        0.0,
        "09:00:00 UTC",
        "USD",
    )
    .expect("valid market data");

    let valuation = Valuation::compute(Some(&market), None, 1.0);

    // Price per gram of a 31.1034768/oz quote is exactly one.
    assert!((valuation.price_per_gram - 1.0).abs() < 1e-12);
    assert!((valuation.base_value - 1.0).abs() < 1e-12);
}
