use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale at which category aggregates are rounded
pub const REPORT_SCALE: u32 = 2;

/// Round half-up (away from zero) to `scale` decimal places
pub fn round_half_up(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an aggregated report amount to two decimal places
pub fn round_report_amount(amount: Decimal) -> Decimal {
    round_half_up(amount, REPORT_SCALE)
}

/// Reporting currencies with their display precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro (2 decimal places)
    EUR,
    /// US Dollar (2 decimal places)
    USD,
    /// Pound Sterling (2 decimal places)
    GBP,
    /// Indonesian Rupiah (no decimal places)
    IDR,
    /// Japanese Yen (no decimal places)
    JPY,
}

impl Currency {
    /// Returns the display scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::IDR | Currency::JPY => 0,
            Currency::EUR | Currency::USD | Currency::GBP => 2,
        }
    }

    pub fn iso_code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::IDR => "IDR",
            Currency::JPY => "JPY",
        }
    }

    /// Rounds a value to the display scale of this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        round_half_up(amount, self.scale())
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.scale();
        let rounded = self.round(amount);
        if scale == 0 {
            format!("{} {}", self, rounded)
        } else {
            format!("{} {:.width$}", self, rounded, width = scale as usize)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso_code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "IDR" => Ok(Currency::IDR),
            "JPY" => Ok(Currency::JPY),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

/// Locale-aware price formatting supplied by the hosting application.
///
/// The report engine only hands over the raw decimal; how it is rendered
/// (symbols, separators, placement) is up to the implementation.
pub trait PriceFormatter: Send + Sync {
    fn format_price(&self, amount: Decimal, currency: Currency) -> String;
}

/// Formatter used when the host does not provide one: `"EUR 1234.50"`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoPriceFormatter;

impl PriceFormatter for IsoPriceFormatter {
    fn format_price(&self, amount: Decimal, currency: Currency) -> String {
        currency.format_amount(amount)
    }
}
