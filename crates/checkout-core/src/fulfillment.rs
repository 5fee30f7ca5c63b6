//! # Fulfillment Group Transformation
//!
//! Reshapes one cart fulfillment group (raw shipment quotes, item ids) into
//! a [`CheckoutFulfillmentGroup`] (priced options, selected option, items).
//!
//! ## Pricing an Option
//! ```text
//! quote { rate: 5, handlingPrice: 1, shippingPrice: 5 }
//!      │
//!      ▼
//! handlingPrice = handlingPrice || 0      → 1
//! shippingPrice = shippingPrice || 0      → 5
//! price         = (rate + handling) || 0  → 6
//!
//! quote { rate: 5 }                        (handling missing)
//!      │
//!      ▼
//! price = (5 + <missing>) || 0             → 0, not 5
//! ```
//!
//! The transformer works from the group itself, never from its position in
//! `cart.shipping`, so carts with several groups need no changes here.

use tracing::trace;

use crate::cart::{Cart, CartItem, FulfillmentGroup, ShipmentQuote, ShippingMethod};
use crate::checkout::{
    CheckoutFulfillmentGroup, FulfillmentGroupData, FulfillmentMethod, FulfillmentOption,
    FulfillmentType, SelectedFulfillmentOption,
};
use crate::money::{falsy_to_zero, operand, or_zero, Money};

/// Transforms one fulfillment group of `cart` for checkout.
///
/// `currency_code` is the currency stamped on every price; the composer
/// passes the cart's resolved currency.
pub fn xform_cart_fulfillment_group(
    group: &FulfillmentGroup,
    cart: &Cart,
    currency_code: &str,
) -> CheckoutFulfillmentGroup {
    let available_fulfillment_options = group
        .shipment_quotes
        .iter()
        .map(|quote| xform_shipment_quote(quote, currency_code))
        .collect();

    let selected_fulfillment_option = group
        .shipment_method
        .as_ref()
        .map(|method| xform_selected_method(method, currency_code));

    let items = items_in_group(group, &cart.items);

    trace!(
        group_id = %group.id,
        options = group.shipment_quotes.len(),
        items = items.len(),
        selected = selected_fulfillment_option.is_some(),
        "Transformed fulfillment group"
    );

    CheckoutFulfillmentGroup {
        id: group.id.clone(),
        available_fulfillment_options,
        data: FulfillmentGroupData {
            shipping_address: group.address.clone(),
        },
        items,
        selected_fulfillment_option,
        shipping_address: group.address.clone(),
        shop_id: group.shop_id.clone(),
        fulfillment_type: FulfillmentType::Shipping,
    }
}

/// Normalizes a shipping method for display.
///
/// Empty strings count as missing: an empty label falls back to the name,
/// and an empty carrier or group becomes `None`.
pub fn xform_fulfillment_method(method: &ShippingMethod) -> FulfillmentMethod {
    FulfillmentMethod {
        id: method.id.clone(),
        carrier: non_empty(&method.carrier),
        display_name: non_empty(&method.label).or_else(|| method.name.clone()),
        group: non_empty(&method.group),
        name: method.name.clone(),
        fulfillment_types: method.fulfillment_types.clone(),
    }
}

fn xform_shipment_quote(quote: &ShipmentQuote, currency_code: &str) -> FulfillmentOption {
    let price = falsy_to_zero(operand(quote.rate) + operand(quote.handling_price));

    FulfillmentOption {
        fulfillment_method: xform_fulfillment_method(&quote.method),
        handling_price: Money::new(or_zero(quote.handling_price), currency_code),
        price: Money::new(price, currency_code),
        shipping_price: Money::new(or_zero(quote.shipping_price), currency_code),
    }
}

fn xform_selected_method(method: &ShippingMethod, currency_code: &str) -> SelectedFulfillmentOption {
    let price = falsy_to_zero(operand(method.rate) + operand(method.handling));

    SelectedFulfillmentOption {
        fulfillment_method: xform_fulfillment_method(method),
        handling_price: Money::new(or_zero(method.handling), currency_code),
        price: Money::new(price, currency_code),
    }
}

/// Cart items listed in the group's `itemIds`, in cart order.
fn items_in_group(group: &FulfillmentGroup, items: &[CartItem]) -> Vec<CartItem> {
    items
        .iter()
        .filter(|item| group.contains_item(&item.id))
        .cloned()
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cart(value: serde_json::Value) -> Cart {
        Cart::from_value(value).unwrap()
    }

    fn sample_cart() -> Cart {
        cart(json!({
            "currencyCode": "USD",
            "items": [
                { "_id": "a", "subtotal": { "amount": 10 } },
                { "_id": "b", "subtotal": { "amount": 20 } },
                { "_id": "c", "subtotal": { "amount": 30 } }
            ],
            "shipping": [{
                "_id": "g1",
                "shopId": "shop-1",
                "address": { "fullName": "Ada Lovelace", "city": "London", "country": "GB" },
                "itemIds": ["c", "a"],
                "shipmentQuotes": [
                    {
                        "method": { "_id": "m1", "name": "Standard", "fulfillmentTypes": ["shipping"] },
                        "rate": 5,
                        "handlingPrice": 1,
                        "shippingPrice": 5
                    },
                    {
                        "method": { "_id": "m2", "name": "express", "label": "Express", "carrier": "UPS", "group": "Air" },
                        "rate": 15,
                        "handlingPrice": 2,
                        "shippingPrice": 15
                    }
                ]
            }]
        }))
    }

    #[test]
    fn test_available_options_are_priced() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");

        assert_eq!(group.available_fulfillment_options.len(), 2);

        let standard = &group.available_fulfillment_options[0];
        assert_eq!(standard.price, Money::new(6.0, "USD"));
        assert_eq!(standard.handling_price, Money::new(1.0, "USD"));
        assert_eq!(standard.shipping_price, Money::new(5.0, "USD"));

        let express = &group.available_fulfillment_options[1];
        assert_eq!(express.price.amount, 17.0);
    }

    #[test]
    fn test_method_normalization() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");

        let standard = &group.available_fulfillment_options[0].fulfillment_method;
        assert_eq!(standard.id, "m1");
        assert_eq!(standard.display_name.as_deref(), Some("Standard"));
        assert_eq!(standard.carrier, None);
        assert_eq!(standard.group, None);
        assert_eq!(standard.fulfillment_types, vec!["shipping".to_string()]);

        let express = &group.available_fulfillment_options[1].fulfillment_method;
        assert_eq!(express.display_name.as_deref(), Some("Express"));
        assert_eq!(express.name.as_deref(), Some("express"));
        assert_eq!(express.carrier.as_deref(), Some("UPS"));
        assert_eq!(express.group.as_deref(), Some("Air"));
    }

    #[test]
    fn test_empty_label_falls_back_to_name() {
        let method: ShippingMethod = serde_json::from_value(json!({
            "_id": "m1", "name": "Ground", "label": "", "carrier": ""
        }))
        .unwrap();
        let normalized = xform_fulfillment_method(&method);
        assert_eq!(normalized.display_name.as_deref(), Some("Ground"));
        assert_eq!(normalized.carrier, None);
    }

    #[test]
    fn test_price_falls_back_to_zero() {
        let cart = cart(json!({
            "currencyCode": "EUR",
            "shipping": [{
                "_id": "g1",
                "itemIds": [],
                "shipmentQuotes": [
                    { "method": { "_id": "none" } },
                    { "method": { "_id": "rate-only" }, "rate": 5 },
                    { "method": { "_id": "zero" }, "rate": 0, "handlingPrice": 0 }
                ]
            }]
        }));
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "EUR");

        for option in &group.available_fulfillment_options {
            assert_eq!(option.price, Money::zero("EUR"));
            assert_eq!(option.handling_price, Money::zero("EUR"));
            assert_eq!(option.shipping_price, Money::zero("EUR"));
        }
    }

    #[test]
    fn test_no_selected_method() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");
        assert!(group.selected_fulfillment_option.is_none());
    }

    #[test]
    fn test_selected_method() {
        let cart = cart(json!({
            "currencyCode": "USD",
            "shipping": [{
                "_id": "g1",
                "itemIds": [],
                "shipmentMethod": {
                    "_id": "m1",
                    "name": "Standard",
                    "label": "Standard (3-5 days)",
                    "carrier": "USPS",
                    "rate": 10,
                    "handling": 2
                }
            }]
        }));
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");

        let selected = group.selected_fulfillment_option.unwrap();
        assert_eq!(selected.price, Money::new(12.0, "USD"));
        assert_eq!(selected.handling_price, Money::new(2.0, "USD"));
        assert_eq!(
            selected.fulfillment_method.display_name.as_deref(),
            Some("Standard (3-5 days)")
        );

        // The selected option has no shippingPrice field
        let value = serde_json::to_value(&selected).unwrap();
        assert!(value.get("shippingPrice").is_none());
    }

    #[test]
    fn test_items_follow_cart_order() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");

        let ids: Vec<&str> = group.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_item_outside_group_is_excluded() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");
        assert!(group.items.iter().all(|item| item.id != "b"));
    }

    #[test]
    fn test_address_and_pass_through_fields() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "USD");

        assert_eq!(group.id, "g1");
        assert_eq!(group.shop_id.as_deref(), Some("shop-1"));
        assert_eq!(group.fulfillment_type, FulfillmentType::Shipping);
        assert_eq!(group.shipping_address, group.data.shipping_address);
        assert_eq!(
            group.shipping_address.as_ref().and_then(|a| a.city()),
            Some("London")
        );
    }

    #[test]
    fn test_currency_comes_from_argument() {
        let cart = sample_cart();
        let group = xform_cart_fulfillment_group(&cart.shipping[0], &cart, "CAD");
        assert!(group
            .available_fulfillment_options
            .iter()
            .all(|option| option.price.currency_code == "CAD"));
    }
}
