//! Compute a tax-adjusted valuation against the deterministic offline feeds.
//!
//! Run with: `cargo run --example offline_valuation`

use auric_core::{FeedSetBuilder, Metal, ValuationSession};

#[tokio::main]
async fn main() {
    let feeds = FeedSetBuilder::new().with_mock_mode().build();
    let mut session = ValuationSession::new(feeds.price, feeds.tax);

    session.set_metal(Metal::Gold);
    session.select_country("Germany");
    session.select_currency("EUR");
    session.set_weight_grams(10.0);
    session.reload().await;

    let currency = session.currency();
    let valuation = session.valuation();

    println!(
        "spot: {}{:.2}/g  base: {}{:.2}  tax ({}%): {}{:.2}  total: {}{:.2}",
        currency.symbol,
        valuation.price_per_gram,
        currency.symbol,
        valuation.base_value,
        valuation.tax_rate_percent,
        currency.symbol,
        valuation.tax_value,
        currency.symbol,
        valuation.final_value,
    );
}
