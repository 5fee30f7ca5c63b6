//! # Rate Formatting
//!
//! The effective tax rate leaves this crate as a structured display object,
//! not a bare number. The shape belongs to the caller, so formatting sits
//! behind the [`RateFormatter`] trait; [`PercentRateFormatter`] is the
//! stock implementation.
//!
//! ```rust
//! use checkout_core::rate::{PercentRateFormatter, RateFormatter};
//!
//! let rate = PercentRateFormatter::default().format_rate(0.0825);
//! assert_eq!(rate.display_percent, "8.25%");
//! ```

use serde::Serialize;
use ts_rs::TS;

/// Default number of decimals kept in `displayPercent`.
pub const DEFAULT_PERCENT_DECIMALS: usize = 2;

// =============================================================================
// Rate
// =============================================================================

/// A rate ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Rate {
    /// The raw fraction (0.2 = 20%).
    pub amount: f64,

    /// `amount × 100`.
    pub percent: f64,

    /// Human readable percentage, e.g. `"20%"` or `"8.25%"`.
    pub display_percent: String,
}

// =============================================================================
// Formatter Seam
// =============================================================================

/// Turns a numeric rate (a fraction) into a [`Rate`].
pub trait RateFormatter {
    fn format_rate(&self, rate: f64) -> Rate;
}

/// Any `Fn(f64) -> Rate` works as a formatter.
impl<F> RateFormatter for F
where
    F: Fn(f64) -> Rate,
{
    fn format_rate(&self, rate: f64) -> Rate {
        self(rate)
    }
}

/// Formats a rate as a percentage rounded to a fixed number of decimals,
/// with trailing zeros trimmed (`0.1` → `"10%"`, `0.0825` → `"8.25%"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentRateFormatter {
    pub decimals: usize,
}

impl PercentRateFormatter {
    pub const fn new(decimals: usize) -> Self {
        PercentRateFormatter { decimals }
    }
}

impl Default for PercentRateFormatter {
    fn default() -> Self {
        PercentRateFormatter::new(DEFAULT_PERCENT_DECIMALS)
    }
}

impl RateFormatter for PercentRateFormatter {
    fn format_rate(&self, rate: f64) -> Rate {
        let percent = rate * 100.0;
        Rate {
            amount: rate,
            percent,
            display_percent: format!("{}%", trim_decimals(percent, self.decimals)),
        }
    }
}

fn trim_decimals(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value);
    if !fixed.contains('.') {
        return fixed;
    }

    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_percent() {
        let rate = PercentRateFormatter::default().format_rate(0.1);
        assert_eq!(rate.amount, 0.1);
        assert!((rate.percent - 10.0).abs() < 1e-9);
        assert_eq!(rate.display_percent, "10%");
    }

    #[test]
    fn test_fractional_percent() {
        let rate = PercentRateFormatter::default().format_rate(0.0825);
        assert_eq!(rate.display_percent, "8.25%");
    }

    #[test]
    fn test_rounds_to_configured_decimals() {
        let rate = PercentRateFormatter::new(1).format_rate(1.0 / 3.0);
        assert_eq!(rate.display_percent, "33.3%");

        let rate = PercentRateFormatter::new(0).format_rate(0.126);
        assert_eq!(rate.display_percent, "13%");
    }

    #[test]
    fn test_zero_rate() {
        let rate = PercentRateFormatter::default().format_rate(0.0);
        assert_eq!(rate.display_percent, "0%");
    }

    #[test]
    fn test_non_finite_rate_is_not_hidden() {
        let rate = PercentRateFormatter::default().format_rate(f64::NAN);
        assert_eq!(rate.display_percent, "NaN%");

        let rate = PercentRateFormatter::default().format_rate(f64::INFINITY);
        assert_eq!(rate.display_percent, "inf%");
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = |rate: f64| Rate {
            amount: rate,
            percent: rate * 100.0,
            display_percent: "custom".to_string(),
        };
        assert_eq!(formatter.format_rate(0.5).display_percent, "custom");
    }
}
