//! # Checkout Composer
//!
//! The entry point: cart document in, [`Checkout`] out.
//!
//! ## Computation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart                                                                   │
//! │   │                                                                     │
//! │   ├── items[].subtotal.amount ─────────────► itemTotal                  │
//! │   ├── shipping[].shipmentMethod ───────────► fulfillmentTotal (or null) │
//! │   ├── taxSummary.taxes ──► tax.rs ─────────► preTaxPricingTaxTotal      │
//! │   ├── discount ────────────────────────────► discountTotal              │
//! │   └── surcharges[].amount ─────────────────► surchargeTotal             │
//! │                                                                         │
//! │  total = max(0, itemTotal + fulfillmentTotal + preTaxPricingTaxTotal    │
//! │                 + surchargeTotal − discountTotal)                       │
//! │                                                                         │
//! │   └── shipping[] ──► fulfillment.rs ───────► fulfillmentGroups[]        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure and synchronous. Nothing is validated here: a missing item amount
//! or surcharge amount turns the affected totals into NaN, while an explicit
//! `null` amount adds nothing.

use tracing::{debug, warn};

use crate::cart::Cart;
use crate::checkout::{Checkout, CheckoutSummary};
use crate::config::CheckoutConfig;
use crate::fulfillment::xform_cart_fulfillment_group;
use crate::money::{floor_at_zero, nullable_operand, operand, or_zero, Money, NullableMoney};
use crate::rate::RateFormatter;
use crate::tax::calculate_pre_tax_pricing_tax_total;

/// Computes the checkout for a cart using the config's rate formatter.
///
/// ## Example
/// ```rust
/// use checkout_core::{xform_cart_checkout, Cart, CheckoutConfig};
///
/// let cart = Cart::from_json(r#"{
///     "currencyCode": "USD",
///     "items": [{ "_id": "i1", "subtotal": { "amount": 40 } }],
///     "discount": 5
/// }"#).unwrap();
///
/// let checkout = xform_cart_checkout(&cart, &CheckoutConfig::default());
/// assert_eq!(checkout.summary.total.amount, 35.0);
/// assert!(checkout.summary.fulfillment_total.is_none());
/// ```
pub fn xform_cart_checkout(cart: &Cart, config: &CheckoutConfig) -> Checkout {
    let formatter = config.rate_formatter();
    xform_cart_checkout_with(cart, config, &formatter)
}

/// Computes the checkout for a cart with a caller-supplied rate formatter.
pub fn xform_cart_checkout_with<R>(cart: &Cart, config: &CheckoutConfig, rate_formatter: &R) -> Checkout
where
    R: RateFormatter + ?Sized,
{
    let currency_code = resolve_currency_code(cart, config);

    let item_total = cart
        .items
        .iter()
        .fold(0.0, |sum, item| sum + nullable_operand(item.subtotal.amount));

    let fulfillment_total = calculate_fulfillment_total(cart);

    let (tax_total, taxable_amount, taxes) = match &cart.tax_summary {
        Some(summary) => (summary.tax, summary.taxable_amount, summary.taxes.as_deref()),
        None => (None, None, None),
    };

    let pre_tax_pricing_tax_total = calculate_pre_tax_pricing_tax_total(taxes);
    let discount_total = or_zero(cart.discount);
    let surcharge_total = cart
        .surcharges
        .iter()
        .fold(0.0, |sum, surcharge| sum + nullable_operand(surcharge.amount));

    let fulfillment_addend =
        fulfillment_total.unwrap_or_else(|| config.null_fulfillment_total().addend());

    let total = floor_at_zero(
        item_total + fulfillment_addend + pre_tax_pricing_tax_total + surcharge_total
            - discount_total,
    );

    debug!(
        cart_id = ?cart.id,
        currency = %currency_code,
        item_total,
        ?fulfillment_total,
        pre_tax_pricing_tax_total,
        discount_total,
        surcharge_total,
        total,
        "Computed checkout totals"
    );

    // taxSummary exists whenever tax_total is Some
    let effective_tax_rate =
        tax_total.map(|tax| rate_formatter.format_rate(tax / operand(taxable_amount)));

    let fulfillment_groups = cart
        .shipping
        .iter()
        .map(|group| xform_cart_fulfillment_group(group, cart, &currency_code))
        .collect();

    Checkout {
        fulfillment_groups,
        summary: CheckoutSummary {
            discount_total: Money::new(discount_total, currency_code.as_str()),
            effective_tax_rate,
            fulfillment_total: fulfillment_total
                .map(|amount| Money::new(amount, currency_code.as_str())),
            item_total: Money::new(item_total, currency_code.as_str()),
            surcharge_total: Money::new(surcharge_total, currency_code.as_str()),
            taxable_amount: NullableMoney::new(taxable_amount, currency_code.as_str()),
            tax_total: tax_total.map(|amount| Money::new(amount, currency_code.as_str())),
            total: Money::new(total, currency_code.as_str()),
        },
    }
}

/// Shipping rate plus handling over every group with a confirmed method.
///
/// `None` when no group has one; groups without a method are skipped.
fn calculate_fulfillment_total(cart: &Cart) -> Option<f64> {
    let mut selected = cart
        .shipping
        .iter()
        .filter_map(|group| group.shipment_method.as_ref())
        .peekable();

    selected.peek()?;

    let (shipping_total, handling_total) =
        selected.fold((0.0, 0.0), |(shipping, handling), method| {
            (shipping + or_zero(method.rate), handling + or_zero(method.handling))
        });

    Some(shipping_total + handling_total)
}

fn resolve_currency_code(cart: &Cart, config: &CheckoutConfig) -> String {
    match cart.currency_code.as_deref() {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => match config.fallback_currency_code() {
            Some(fallback) => fallback.to_string(),
            None => {
                warn!(cart_id = ?cart.id, "Cart has no currency code");
                String::new()
            }
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
