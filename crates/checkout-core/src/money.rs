//! # Money Module
//!
//! Money value objects for the checkout output, and the small set of numeric
//! rules every total in this crate is computed with.
//!
//! ## The Falsy-To-Zero Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart documents come from a loosely typed store. Optional numbers      │
//! │  (discount, handling, rate, ...) are read with ONE rule:               │
//! │                                                                         │
//! │    absent  ──┐                                                          │
//! │    null    ──┼──► 0                                                     │
//! │    NaN     ──┤                                                          │
//! │    0 / -0  ──┘                                                          │
//! │    other   ──────► itself                                               │
//! │                                                                         │
//! │  "Missing" and "explicitly zero" are indistinguishable on purpose:     │
//! │  downstream consumers already rely on that.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::{or_zero, Money};
//!
//! let handling = or_zero(None);
//! let price = Money::new(5.0 + handling, "USD");
//! assert_eq!(price.amount, 5.0);
//! assert_eq!(price.to_string(), "5.00 USD");
//! ```

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Numeric Rules
// =============================================================================

/// Reads an optional amount with the falsy-to-zero rule.
///
/// Returns the value when it is present, non-zero and not NaN; `0.0`
/// otherwise.
///
/// ## Example
/// ```rust
/// use checkout_core::money::or_zero;
///
/// assert_eq!(or_zero(Some(2.5)), 2.5);
/// assert_eq!(or_zero(None), 0.0);
/// assert_eq!(or_zero(Some(f64::NAN)), 0.0);
/// ```
#[inline]
pub fn or_zero(value: Option<f64>) -> f64 {
    falsy_to_zero(value.unwrap_or(0.0))
}

/// Applies the falsy-to-zero rule to an already computed number.
#[inline]
pub fn falsy_to_zero(value: f64) -> f64 {
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Reads an optional operand for raw addition.
///
/// An absent operand poisons the sum (NaN), which a later
/// [`falsy_to_zero`] turns into `0`. `rate + handling` with either side
/// missing therefore prices the option at zero rather than at the side
/// that is present.
#[inline]
pub fn operand(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// Reads a field that tells `null` apart from absent for raw addition.
///
/// Absent (`None`) poisons the sum like [`operand`]; an explicit `null`
/// (`Some(None)`) adds `0`.
///
/// ## Example
/// ```rust
/// use checkout_core::money::nullable_operand;
///
/// assert_eq!(nullable_operand(Some(Some(4.0))), 4.0);
/// assert_eq!(nullable_operand(Some(None)), 0.0);
/// assert!(nullable_operand(None).is_nan());
/// ```
#[inline]
pub fn nullable_operand(value: Option<Option<f64>>) -> f64 {
    match value {
        Some(amount) => amount.unwrap_or(0.0),
        None => f64::NAN,
    }
}

/// Floors a total at zero without hiding NaN.
///
/// `f64::max` would swallow NaN and return `0.0`; a poisoned total has to
/// stay visible instead.
///
/// ## Example
/// ```rust
/// use checkout_core::money::floor_at_zero;
///
/// assert_eq!(floor_at_zero(-3.0), 0.0);
/// assert_eq!(floor_at_zero(7.5), 7.5);
/// assert!(floor_at_zero(f64::NAN).is_nan());
/// ```
#[inline]
pub fn floor_at_zero(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount tagged with the cart's currency.
///
/// ## Design Decisions
/// - **f64 amount**: cart documents carry decimal numbers and the totals
///   have to reproduce NaN propagation for malformed input. NaN serializes
///   as JSON `null`.
/// - **Currency on every value**: always the cart's `currencyCode`, never a
///   per-line currency.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  summary.itemTotal / discountTotal / surchargeTotal / total             │
/// │  summary.fulfillmentTotal / taxTotal        (whole object may be null)  │
/// │  fulfillmentGroups[].availableFulfillmentOptions[].price / ...          │
/// │  fulfillmentGroups[].selectedFulfillmentOption.price / handlingPrice    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Money {
    /// Amount in major units (12.5 = twelve and a half).
    pub amount: f64,

    /// ISO 4217 currency code copied from the cart.
    pub currency_code: String,
}

impl Money {
    /// Creates a Money value.
    #[inline]
    pub fn new(amount: f64, currency_code: impl Into<String>) -> Self {
        Money {
            amount,
            currency_code: currency_code.into(),
        }
    }

    /// Zero in the given currency.
    #[inline]
    pub fn zero(currency_code: impl Into<String>) -> Self {
        Money::new(0.0, currency_code)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Checks if the amount is NaN (a poisoned total).
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.amount.is_nan()
    }
}

/// Debug-friendly rendering; UI formatting lives with the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency_code)
    }
}

// =============================================================================
// Nullable Money
// =============================================================================

/// Money whose amount may be `null` while the currency is still known.
///
/// Only `summary.taxableAmount` uses this: before tax is calculated the
/// field is `{ "amount": null, "currencyCode": "USD" }` rather than absent.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NullableMoney {
    pub amount: Option<f64>,
    pub currency_code: String,
}

impl NullableMoney {
    #[inline]
    pub fn new(amount: Option<f64>, currency_code: impl Into<String>) -> Self {
        NullableMoney {
            amount,
            currency_code: currency_code.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
