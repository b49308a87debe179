//! Fixed reference data: supported display currencies and market regions.
//!
//! The first entry of each table defines the application default.

use serde::Serialize;

/// Supported display currency, immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,
}

/// Supported market region, immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub name: &'static str,
    pub iso_code: &'static str,
    pub flag: &'static str,
}

pub const SUPPORTED_CURRENCIES: [Currency; 10] = [
    Currency { code: "USD", name: "US Dollar", symbol: "$", flag: Some("🇺🇸") },
    Currency { code: "EUR", name: "Euro", symbol: "€", flag: Some("🇪🇺") },
    Currency { code: "GBP", name: "British Pound", symbol: "£", flag: Some("🇬🇧") },
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹", flag: Some("🇮🇳") },
    Currency { code: "AED", name: "UAE Dirham", symbol: "د.إ", flag: Some("🇦🇪") },
    Currency { code: "SAR", name: "Saudi Riyal", symbol: "SR", flag: Some("🇸🇦") },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥", flag: Some("🇯🇵") },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$", flag: Some("🇦🇺") },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$", flag: Some("🇨🇦") },
    Currency { code: "CNY", name: "Chinese Yuan", symbol: "¥", flag: Some("🇨🇳") },
];

pub const COUNTRIES: [Country; 11] = [
    Country { name: "India", iso_code: "IN", flag: "🇮🇳" },
    Country { name: "United Arab Emirates", iso_code: "AE", flag: "🇦🇪" },
    Country { name: "United States", iso_code: "US", flag: "🇺🇸" },
    Country { name: "United Kingdom", iso_code: "GB", flag: "🇬🇧" },
    Country { name: "Saudi Arabia", iso_code: "SA", flag: "🇸🇦" },
    Country { name: "Germany", iso_code: "DE", flag: "🇩🇪" },
    Country { name: "China", iso_code: "CN", flag: "🇨🇳" },
    Country { name: "Japan", iso_code: "JP", flag: "🇯🇵" },
    Country { name: "Australia", iso_code: "AU", flag: "🇦🇺" },
    Country { name: "Canada", iso_code: "CA", flag: "🇨🇦" },
    Country { name: "Singapore", iso_code: "SG", flag: "🇸🇬" },
];

pub const fn default_currency() -> Currency {
    SUPPORTED_CURRENCIES[0]
}

pub const fn default_country() -> Country {
    COUNTRIES[0]
}

/// Case-insensitive lookup by ISO code.
pub fn find_currency(code: &str) -> Option<Currency> {
    let needle = code.trim();
    SUPPORTED_CURRENCIES
        .iter()
        .copied()
        .find(|currency| currency.code.eq_ignore_ascii_case(needle))
}

/// Case-insensitive lookup by country name or ISO code.
pub fn find_country(name: &str) -> Option<Country> {
    let needle = name.trim();
    COUNTRIES.iter().copied().find(|country| {
        country.name.eq_ignore_ascii_case(needle) || country.iso_code.eq_ignore_ascii_case(needle)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_first_entries() {
        assert_eq!(default_currency().code, "USD");
        assert_eq!(default_country().name, "India");
    }

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(find_currency("inr").expect("known").symbol, "₹");
        assert_eq!(find_country("singapore").expect("known").iso_code, "SG");
        assert_eq!(find_country("gb").expect("known").name, "United Kingdom");
    }

    #[test]
    fn unknown_entries_yield_none() {
        assert!(find_currency("XYZ").is_none());
        assert!(find_country("Atlantis").is_none());
    }
}
