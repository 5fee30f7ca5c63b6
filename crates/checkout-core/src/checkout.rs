//! # Checkout Types
//!
//! The output side of the crate: what the resolver layer hands to clients.
//! These types are serialize-only; a NaN amount leaves as `null` and is not
//! read back.
//!
//! ## Output Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout                                                               │
//! │  ├── fulfillmentGroups[]                                                │
//! │  │     ├── _id, shopId, type = "shipping"                               │
//! │  │     ├── availableFulfillmentOptions[]                                │
//! │  │     │     └── fulfillmentMethod, price, handlingPrice, shippingPrice │
//! │  │     ├── selectedFulfillmentOption? (no shippingPrice)                │
//! │  │     ├── items[]            (the cart items of this group)            │
//! │  │     ├── shippingAddress                                              │
//! │  │     └── data.shippingAddress (same address, kept for old clients)    │
//! │  └── summary                                                            │
//! │        ├── itemTotal, discountTotal, surchargeTotal, total              │
//! │        ├── fulfillmentTotal?  taxTotal?  effectiveTaxRate?              │
//! │        └── taxableAmount (amount may be null)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::cart::{Address, CartItem};
use crate::money::{Money, NullableMoney};
use crate::rate::Rate;

// =============================================================================
// Checkout
// =============================================================================

/// The computed checkout for one cart.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Checkout {
    pub fulfillment_groups: Vec<CheckoutFulfillmentGroup>,
    pub summary: CheckoutSummary,
}

impl Checkout {
    /// Finds a transformed fulfillment group by the identifier of the cart
    /// group it came from.
    pub fn fulfillment_group(&self, group_id: &str) -> Option<&CheckoutFulfillmentGroup> {
        self.fulfillment_groups
            .iter()
            .find(|group| group.id == group_id)
    }
}

/// Checkout totals. Every amount carries the cart's currency code.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutSummary {
    pub discount_total: Money,

    /// `tax / taxableAmount`, present only when a tax total exists.
    pub effective_tax_rate: Option<Rate>,

    /// `null` until at least one group has a confirmed shipping method.
    pub fulfillment_total: Option<Money>,

    pub item_total: Money,

    pub surcharge_total: Money,

    pub taxable_amount: NullableMoney,

    /// `null` until tax has been calculated.
    pub tax_total: Option<Money>,

    /// Never negative. NaN (serialized `null`) only for malformed input.
    pub total: Money,
}

// =============================================================================
// Fulfillment Groups
// =============================================================================

/// The only fulfillment type supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FulfillmentType {
    #[default]
    Shipping,
}

/// A cart fulfillment group reshaped for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutFulfillmentGroup {
    #[serde(rename = "_id")]
    pub id: String,

    pub available_fulfillment_options: Vec<FulfillmentOption>,

    pub data: FulfillmentGroupData,

    /// Cart items that belong to this group, in cart order.
    #[ts(type = "Array<Record<string, unknown>>")]
    pub items: Vec<CartItem>,

    pub selected_fulfillment_option: Option<SelectedFulfillmentOption>,

    /// The group's address, field for field.
    #[ts(type = "Record<string, unknown> | null")]
    pub shipping_address: Option<Address>,

    pub shop_id: Option<String>,

    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
}

/// Type-specific group data.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FulfillmentGroupData {
    #[ts(type = "Record<string, unknown> | null")]
    pub shipping_address: Option<Address>,
}

// =============================================================================
// Fulfillment Options
// =============================================================================

/// A shipping method normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FulfillmentMethod {
    #[serde(rename = "_id")]
    pub id: String,

    pub carrier: Option<String>,

    /// The method's label, or its name when there is no label.
    pub display_name: Option<String>,

    pub group: Option<String>,

    pub name: Option<String>,

    pub fulfillment_types: Vec<String>,
}

/// One quoted option the shopper can pick.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FulfillmentOption {
    pub fulfillment_method: FulfillmentMethod,

    pub handling_price: Money,

    /// `rate + handlingPrice`.
    pub price: Money,

    pub shipping_price: Money,
}

/// The option the shopper picked.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SelectedFulfillmentOption {
    pub fulfillment_method: FulfillmentMethod,

    pub handling_price: Money,

    /// `rate + handling`.
    pub price: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
