//! # Cart Document Types
//!
//! The input side of the crate: the cart document as stored by the caller.
//! Field names follow the document (`_id`, camelCase).
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart                                                                   │
//! │  ├── currencyCode                                                       │
//! │  ├── items[]            ──► _id, subtotal.amount, (anything else kept)  │
//! │  ├── shipping[]         ──► FulfillmentGroup                            │
//! │  │     ├── _id, shopId, address, itemIds[]                              │
//! │  │     ├── shipmentQuotes[] ──► { method, rate, handlingPrice, ... }    │
//! │  │     └── shipmentMethod?  ──► the confirmed method                    │
//! │  ├── discount?                                                          │
//! │  ├── surcharges[]       ──► { amount }                                  │
//! │  └── taxSummary?        ──► { tax, taxableAmount, taxes[] }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Required vs Optional
//! Fields read with a default (discount, rates, handling, ...) are `Option`
//! here and defaulted by the checkout math. Fields the math reads without a
//! default are required, so a broken document fails at parse time:
//! `items[]._id`, `items[].subtotal`, `shipping[]._id`,
//! `shipping[].itemIds`, `shipmentQuotes[].method`, and a method's `_id`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CheckoutResult;

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart document. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Attached to every money value in the checkout output.
    #[serde(default)]
    pub currency_code: Option<String>,

    /// Line items in cart order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CartItem>,

    /// Fulfillment groups. Today a cart holds at most one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipping: Vec<FulfillmentGroup>,

    /// Cart-level discount amount.
    #[serde(default)]
    pub discount: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub surcharges: Vec<Surcharge>,

    /// Absent until tax has been calculated for the cart.
    #[serde(default)]
    pub tax_summary: Option<TaxSummary>,
}

impl Cart {
    /// Parses a cart document from JSON text.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::cart::Cart;
    ///
    /// let cart = Cart::from_json(r#"{
    ///     "currencyCode": "USD",
    ///     "items": [{ "_id": "i1", "subtotal": { "amount": 9.5 } }]
    /// }"#).unwrap();
    /// assert_eq!(cart.items.len(), 1);
    ///
    /// // Missing subtotal: rejected, not guessed
    /// assert!(Cart::from_json(r#"{ "items": [{ "_id": "i1" }] }"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> CheckoutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a cart document from an already decoded JSON value.
    pub fn from_value(value: Value) -> CheckoutResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Looks up a fulfillment group by its identifier.
    pub fn fulfillment_group(&self, group_id: &str) -> Option<&FulfillmentGroup> {
        self.shipping.iter().find(|group| group.id == group_id)
    }
}

// =============================================================================
// Items
// =============================================================================

/// A cart line item.
///
/// Only `_id` and `subtotal` matter to the checkout math. Every other field
/// of the document is kept in `attributes` so the item reaches the output
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: String,

    pub subtotal: ItemSubtotal,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// `quantity × unit price` for one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSubtotal {
    /// Absent (`None`) poisons the item total; `null` (`Some(None)`) adds
    /// nothing.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Option<f64>>,

    /// `currencyCode` and whatever else the document carries.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ItemSubtotal {
    /// The line's own currency code. Totals ignore it.
    pub fn currency_code(&self) -> Option<&str> {
        self.attributes.get("currencyCode").and_then(Value::as_str)
    }
}

/// An extra charge applied to the cart (e.g. a hazmat fee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surcharge {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Same reading as [`ItemSubtotal::amount`].
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Option<f64>>,
}

// =============================================================================
// Fulfillment
// =============================================================================

/// A bundle of items shipped together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentGroup {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub shop_id: Option<String>,

    #[serde(default)]
    pub address: Option<Address>,

    /// Identifiers of the cart items in this group.
    pub item_ids: Vec<String>,

    /// Priced options offered for this group, not yet selected.
    #[serde(default, deserialize_with = "null_as_default")]
    pub shipment_quotes: Vec<ShipmentQuote>,

    /// The confirmed method, once the shopper has picked one.
    #[serde(default)]
    pub shipment_method: Option<ShippingMethod>,
}

impl FulfillmentGroup {
    /// Checks whether an item belongs to this group.
    #[inline]
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.item_ids.iter().any(|id| id == item_id)
    }
}

/// One quoted shipping option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentQuote {
    pub method: ShippingMethod,

    #[serde(default)]
    pub rate: Option<f64>,

    #[serde(default)]
    pub handling_price: Option<f64>,

    #[serde(default)]
    pub shipping_price: Option<f64>,
}

/// A shipping method, as quoted or as selected on the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub carrier: Option<String>,

    /// Shopper-facing label; wins over `name` for display.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fulfillment_types: Vec<String>,

    #[serde(default)]
    pub rate: Option<f64>,

    #[serde(default)]
    pub handling: Option<f64>,
}

/// A postal address, kept exactly as the document has it.
///
/// Addresses are passed to the checkout output untouched, so the whole
/// object is held and the common fields are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address {
    fields: Map<String, Value>,
}

impl Address {
    /// Every field of the address document.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Reads a string field; `None` when absent, `null` or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("_id")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.get_str("fullName")
    }

    pub fn city(&self) -> Option<&str> {
        self.get_str("city")
    }

    pub fn region(&self) -> Option<&str> {
        self.get_str("region")
    }

    pub fn postal(&self) -> Option<&str> {
        self.get_str("postal")
    }

    pub fn country(&self) -> Option<&str> {
        self.get_str("country")
    }

    pub fn is_commercial(&self) -> bool {
        self.fields
            .get("isCommercial")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

// =============================================================================
// Tax
// =============================================================================

/// Result of the caller's tax calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    #[serde(default)]
    pub tax: Option<f64>,

    #[serde(default)]
    pub taxable_amount: Option<f64>,

    #[serde(default)]
    pub taxes: Option<Vec<TaxLine>>,
}

/// One calculated tax.
///
/// An absent `tax` is read the same as `null`: the amount is indeterminate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    #[serde(default)]
    pub tax: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<TaxCustomFields>,
}

impl TaxLine {
    /// True when the tax is already embedded in the listed prices.
    #[inline]
    pub fn is_after_tax_pricing(&self) -> bool {
        self.custom_fields
            .as_ref()
            .and_then(|fields| fields.after_tax_pricing)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCustomFields {
    #[serde(default)]
    pub after_tax_pricing: Option<bool>,
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Marks a field as present, so an explicit `null` reads as `Some(None)`
/// while a missing field falls back to `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckoutError;
    use serde_json::json;

    #[test]
    fn test_minimal_cart() {
        let cart = Cart::from_value(json!({ "currencyCode": "USD" })).unwrap();
        assert!(cart.items.is_empty());
        assert!(cart.shipping.is_empty());
        assert!(cart.surcharges.is_empty());
        assert_eq!(cart.discount, None);
        assert_eq!(cart.tax_summary, None);
    }

    #[test]
    fn test_null_collections_read_as_empty() {
        let cart = Cart::from_value(json!({
            "currencyCode": "USD",
            "items": null,
            "shipping": null,
            "surcharges": null
        }))
        .unwrap();
        assert!(cart.items.is_empty());
        assert!(cart.shipping.is_empty());
        assert!(cart.surcharges.is_empty());
    }

    #[test]
    fn test_item_keeps_extra_fields() {
        let cart = Cart::from_value(json!({
            "items": [{
                "_id": "item-1",
                "productId": "p-1",
                "quantity": 2,
                "subtotal": { "amount": 19.98, "currencyCode": "USD" }
            }]
        }))
        .unwrap();

        let item = &cart.items[0];
        assert_eq!(item.id, "item-1");
        assert_eq!(item.subtotal.amount, Some(Some(19.98)));
        assert_eq!(item.subtotal.currency_code(), Some("USD"));
        assert_eq!(item.attributes["productId"], json!("p-1"));
        assert_eq!(item.attributes["quantity"], json!(2));

        let back = serde_json::to_value(item).unwrap();
        assert_eq!(back["productId"], json!("p-1"));
        assert_eq!(back["_id"], json!("item-1"));
    }

    #[test]
    fn test_address_keeps_every_field() {
        let document = json!({
            "_id": "addr-1",
            "fullName": "Ada Lovelace",
            "firstName": "Ada",
            "city": "London",
            "country": "GB",
            "isCommercial": true,
            "isShippingDefault": true
        });
        let address: Address = serde_json::from_value(document.clone()).unwrap();

        assert_eq!(address.id(), Some("addr-1"));
        assert_eq!(address.full_name(), Some("Ada Lovelace"));
        assert_eq!(address.city(), Some("London"));
        assert_eq!(address.region(), None);
        assert!(address.is_commercial());
        assert_eq!(address.get_str("firstName"), Some("Ada"));
        assert_eq!(serde_json::to_value(&address).unwrap(), document);
    }

    #[test]
    fn test_null_and_missing_amounts_differ() {
        let cart = Cart::from_value(json!({
            "items": [
                { "_id": "a", "subtotal": { "amount": null } },
                { "_id": "b", "subtotal": {} }
            ],
            "surcharges": [{ "amount": null }, {}]
        }))
        .unwrap();

        assert_eq!(cart.items[0].subtotal.amount, Some(None));
        assert_eq!(cart.items[1].subtotal.amount, None);
        assert_eq!(cart.surcharges[0].amount, Some(None));
        assert_eq!(cart.surcharges[1].amount, None);

        // The explicit null survives serialization, the absent field stays absent
        let back = serde_json::to_value(&cart.items[0]).unwrap();
        assert_eq!(back["subtotal"], json!({ "amount": null }));
        let back = serde_json::to_value(&cart.items[1]).unwrap();
        assert_eq!(back["subtotal"], json!({}));
    }

    #[test]
    fn test_group_without_item_ids_is_rejected() {
        let result = Cart::from_value(json!({
            "shipping": [{ "_id": "g1", "shopId": "s1" }]
        }));
        assert!(matches!(result, Err(CheckoutError::InvalidCart(_))));
    }

    #[test]
    fn test_quote_without_method_is_rejected() {
        let result = Cart::from_value(json!({
            "shipping": [{ "_id": "g1", "itemIds": [], "shipmentQuotes": [{ "rate": 5 }] }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_fulfillment_group_lookup() {
        let cart = Cart::from_value(json!({
            "shipping": [
                { "_id": "g1", "itemIds": ["a", "b"] },
                { "_id": "g2", "itemIds": ["c"] }
            ]
        }))
        .unwrap();

        let group = cart.fulfillment_group("g2").unwrap();
        assert!(group.contains_item("c"));
        assert!(!group.contains_item("a"));
        assert!(cart.fulfillment_group("missing").is_none());
    }

    #[test]
    fn test_after_tax_pricing_flag() {
        let line: TaxLine = serde_json::from_value(json!({
            "tax": 1.5,
            "customFields": { "afterTaxPricing": true }
        }))
        .unwrap();
        assert!(line.is_after_tax_pricing());

        let line: TaxLine = serde_json::from_value(json!({ "tax": 1.5 })).unwrap();
        assert!(!line.is_after_tax_pricing());

        let line: TaxLine = serde_json::from_value(json!({ "tax": null, "customFields": {} })).unwrap();
        assert_eq!(line.tax, None);
        assert!(!line.is_after_tax_pricing());
    }
}
