//! CLI argument definitions for auric.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Compute a tax-adjusted valuation for a weight of metal |
//! | `spot` | Fetch the current spot price for a metal/currency pair |
//! | `tax` | Estimate the regional duty/VAT percentage for a country |
//! | `regions` | List the supported market regions |
//! | `currencies` | List the supported display currencies |
//! | `watch` | Interactive live dashboard |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--mock` | `false` | Deterministic offline feeds, no network |
//! | `--timeout-ms` | `3000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Tax-adjusted value of 10g of gold for India, priced in USD
//! auric value gold --weight-grams 10
//!
//! # Spot silver in euros, human-readable
//! auric spot silver --currency EUR --format table
//!
//! # Live dashboard with the dark theme
//! auric watch --theme dark
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use auric_core::Metal;

/// Tax-adjusted precious metal valuation CLI.
///
/// Combines a live spot-price feed with an AI-driven regional tax estimate
/// and derives base, tax, and final values for a given weight of metal.
#[derive(Debug, Parser)]
#[command(
    name = "auric",
    author,
    version,
    about = "Tax-adjusted precious metal valuation CLI",
    long_about = "Auric combines a live spot-price feed with an AI-driven regional tax \
estimate and derives base, tax, and final values for a given weight of gold or silver.\n\
\n\
  • Spot prices via the goldapi.io contract (AURIC_GOLDAPI_KEY)\n\
  • Regional duty/VAT estimates via Gemini (AURIC_GEMINI_API_KEY)\n\
  • Structured JSON output with metadata\n\
  • Interactive terminal dashboard (watch)\n\
\n\
Feeds without an API key fall back to deterministic offline data.\n\
Use 'auric <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Use deterministic offline feeds instead of the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 3000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Metal selector shared by the fetching commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetalArg {
    Gold,
    Silver,
}

impl From<MetalArg> for Metal {
    fn from(value: MetalArg) -> Self {
        match value {
            MetalArg::Gold => Metal::Gold,
            MetalArg::Silver => Metal::Silver,
        }
    }
}

/// Dashboard color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a tax-adjusted valuation for a weight of metal.
    ///
    /// Fetches the spot price and the regional tax estimate concurrently and
    /// derives price-per-gram, base, tax, and final values.
    ///
    /// # Examples
    ///
    ///   auric value gold --weight-grams 10
    ///   auric value silver --country Germany --currency EUR --pretty
    Value(ValueArgs),

    /// Fetch the current spot price for a metal/currency pair.
    ///
    /// # Examples
    ///
    ///   auric spot gold
    ///   auric spot silver --currency JPY
    Spot(SpotArgs),

    /// Estimate the regional duty/VAT percentage for a metal/country pair.
    ///
    /// Lookup failures resolve to 0% rather than an error.
    ///
    /// # Examples
    ///
    ///   auric tax gold India
    ///   auric tax silver "United Arab Emirates"
    Tax(TaxArgs),

    /// List the supported market regions.
    Regions,

    /// List the supported display currencies.
    Currencies,

    /// Interactive live dashboard.
    ///
    /// Searchable country/currency selection, metal toggle, weight entry,
    /// and a reactively updating valuation breakdown.
    Watch(WatchArgs),
}

/// Arguments for the `value` command.
#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Metal to value.
    #[arg(value_enum)]
    pub metal: MetalArg,

    /// Weight in grams. Negative values clamp to zero.
    #[arg(long, default_value_t = 1.0)]
    pub weight_grams: f64,

    /// Market region used for the tax estimate.
    #[arg(long, default_value = "India")]
    pub country: String,

    /// Display currency for all monetary values.
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

/// Arguments for the `spot` command.
#[derive(Debug, Args)]
pub struct SpotArgs {
    /// Metal to quote.
    #[arg(value_enum)]
    pub metal: MetalArg,

    /// Display currency the price is quoted in.
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

/// Arguments for the `tax` command.
#[derive(Debug, Args)]
pub struct TaxArgs {
    /// Metal the purchase concerns.
    #[arg(value_enum)]
    pub metal: MetalArg,

    /// Country or ISO code to estimate for.
    pub country: String,
}

/// Arguments for the `watch` command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Initial metal selection.
    #[arg(long, value_enum, default_value_t = MetalArg::Gold)]
    pub metal: MetalArg,

    /// Initial market region.
    #[arg(long, default_value = "India")]
    pub country: String,

    /// Initial display currency.
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Initial weight in grams.
    #[arg(long, default_value_t = 1.0)]
    pub weight_grams: f64,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    pub theme: ThemeArg,
}
