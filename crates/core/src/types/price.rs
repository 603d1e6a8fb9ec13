//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Create a Hong Kong dollar price from a whole-dollar amount.
    #[must_use]
    pub fn hkd(dollars: i64) -> Self {
        Self::new(Decimal::from(dollars), CurrencyCode::HKD)
    }

    /// Format for display (e.g., "HK$1,200.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), group_thousands(self.amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format a decimal with two places and comma thousands separators.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{rounded:.2}");
    let (sign, digits) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (whole, frac) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac}")
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    HKD,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::HKD => "HK$",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::HKD => "HKD",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::hkd(1200).display(), "HK$1,200.00");
        assert_eq!(Price::hkd(800).display(), "HK$800.00");
        assert_eq!(Price::hkd(1_234_567).display(), "HK$1,234,567.00");
    }

    #[test]
    fn test_display_keeps_cents() {
        let price = Price::new(Decimal::new(99_950, 2), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$999.50");
    }

    #[test]
    fn test_default_currency_is_hkd() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::HKD);
        assert_eq!(CurrencyCode::HKD.code(), "HKD");
    }
}
