//! # Tax Aggregation
//!
//! Works out how much of the cart's calculated tax still has to be added on
//! top of the listed prices.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pre-tax pricing (default)     price $10.00 + tax $0.83 → add the tax   │
//! │  After-tax pricing             price $10.83 incl. tax   → add nothing   │
//! │                                                                         │
//! │  Any line with tax = null      → the whole aggregate is 0               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::TaxLine;

/// Sums the taxes that are not embedded in listed prices.
///
/// ## Rules
/// - `None` or empty input → `0`
/// - Lines flagged `customFields.afterTaxPricing = true` are skipped
/// - The first line with a `null` tax makes the result `0`, even if earlier
///   lines were already summed
///
/// ## Example
/// ```rust
/// use checkout_core::cart::TaxLine;
/// use checkout_core::tax::calculate_pre_tax_pricing_tax_total;
///
/// let lines = vec![
///     TaxLine { tax: Some(1.5), custom_fields: None },
///     TaxLine { tax: Some(2.0), custom_fields: None },
/// ];
/// assert_eq!(calculate_pre_tax_pricing_tax_total(Some(lines.as_slice())), 3.5);
/// assert_eq!(calculate_pre_tax_pricing_tax_total(None), 0.0);
/// ```
pub fn calculate_pre_tax_pricing_tax_total(taxes: Option<&[TaxLine]>) -> f64 {
    let Some(taxes) = taxes else {
        return 0.0;
    };

    let mut total = 0.0;
    for line in taxes {
        let Some(tax) = line.tax else {
            return 0.0;
        };
        if !line.is_after_tax_pricing() {
            total += tax;
        }
    }
    total
}

// =============================================================================
// Unit Tests
// =============================================================================
