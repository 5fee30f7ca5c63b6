//! # checkout-core: Pure Checkout Logic
//!
//! Turns a shopping cart document into a checkout object: item, fulfillment,
//! tax, surcharge, discount and grand totals, plus fulfillment groups
//! reshaped for presentation. Everything here is a pure function over
//! in-memory data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Data Flow                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  API Resolver (caller)                          │   │
//! │  │       loads the cart document, serves the checkout object       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Cart                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ checkout-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌──────────────────────┐   │   │
//! │  │   │  composer  │──►│    tax     │   │     fulfillment      │   │   │
//! │  │   │  totals    │   │ pre-tax    │   │  options, selected,  │   │   │
//! │  │   │  summary   │──────────────────►│  items per group     │   │   │
//! │  │   └────────────┘   └────────────┘   └──────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Input cart document types
//! - [`checkout`] - Output checkout types
//! - [`composer`] - The entry point, [`xform_cart_checkout`]
//! - [`fulfillment`] - Fulfillment group transformation
//! - [`tax`] - Pre-tax-pricing tax aggregation
//! - [`money`] - Money value objects and the falsy-to-zero rule
//! - [`rate`] - Effective tax rate formatting
//! - [`config`] - Checkout configuration
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{xform_cart_checkout, Cart, CheckoutConfig};
//!
//! let cart = Cart::from_json(r#"{
//!     "currencyCode": "USD",
//!     "items": [{ "_id": "i1", "subtotal": { "amount": 100 } }],
//!     "shipping": [{
//!         "_id": "g1",
//!         "itemIds": ["i1"],
//!         "shipmentMethod": { "_id": "m1", "name": "Ground", "rate": 10, "handling": 2 }
//!     }],
//!     "taxSummary": { "tax": 8, "taxableAmount": 100, "taxes": [{ "tax": 8 }] }
//! }"#).unwrap();
//!
//! let checkout = xform_cart_checkout(&cart, &CheckoutConfig::default());
//! assert_eq!(checkout.summary.total.amount, 120.0);
//! assert_eq!(checkout.fulfillment_groups[0].items.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod composer;
pub mod config;
pub mod error;
pub mod fulfillment;
pub mod money;
pub mod rate;
pub mod tax;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use checkout::{Checkout, CheckoutFulfillmentGroup, CheckoutSummary};
pub use composer::{xform_cart_checkout, xform_cart_checkout_with};
pub use config::{CheckoutConfig, NullFulfillmentTotal};
pub use error::{CheckoutError, CheckoutResult};
pub use fulfillment::xform_cart_fulfillment_group;
pub use money::{Money, NullableMoney};
pub use rate::{PercentRateFormatter, Rate, RateFormatter};
pub use tax::calculate_pre_tax_pricing_tax_total;
