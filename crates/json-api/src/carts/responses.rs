//! Cart response bodies.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use cart_app::domain::carts::models::{Cart, CartItemTotal, CartValueTotal, Item, UserId};

fn to_float(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// User Id Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserIdResponse {
    /// The user whose cart was changed
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl From<UserId> for UserIdResponse {
    fn from(user: UserId) -> Self {
        Self {
            user_id: user.into_string(),
        }
    }
}

/// Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemResponse {
    /// Product identifier
    #[serde(rename = "itemid")]
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Unit price
    pub price: f64,

    /// Number of units
    pub quantity: u64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: to_float(item.unit_price),
            quantity: item.quantity,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The items in the cart
    #[serde(rename = "cart")]
    pub items: Vec<ItemResponse>,

    /// The user owning the cart
    #[serde(rename = "userid")]
    pub user_id: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            items: cart.items.into_iter().map(ItemResponse::from).collect(),
            user_id: cart.user_id.into_string(),
        }
    }
}

/// Cart Item Total Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemTotalResponse {
    /// The user owning the cart
    #[serde(rename = "userid")]
    pub user_id: String,

    /// Sum of item quantities
    #[serde(rename = "cartitemtotal")]
    pub total_items: u64,
}

impl From<CartItemTotal> for CartItemTotalResponse {
    fn from(total: CartItemTotal) -> Self {
        Self {
            user_id: total.user_id.into_string(),
            total_items: total.total_items,
        }
    }
}

/// Cart Value Total Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartValueTotalResponse {
    /// The user owning the cart
    #[serde(rename = "userid")]
    pub user_id: String,

    /// Sum of quantity times price
    #[serde(rename = "carttotal")]
    pub total_value: f64,
}

impl From<CartValueTotal> for CartValueTotalResponse {
    fn from(total: CartValueTotal) -> Self {
        Self {
            user_id: total.user_id.into_string(),
            total_value: to_float(total.total_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use cart_app::domain::carts::models::Items;

    use super::*;

    #[test]
    fn cart_uses_wire_names() -> TestResult {
        let cart = Cart {
            user_id: UserId::from("alice"),
            items: Items::from(vec![Item {
                id: "sku1".to_string(),
                name: "Shoe".to_string(),
                description: String::new(),
                unit_price: Decimal::new(999, 2),
                quantity: 2,
            }]),
        };

        let value = serde_json::to_value(CartResponse::from(cart))?;

        assert_eq!(
            value,
            json!({
                "cart": [{
                    "itemid": "sku1",
                    "name": "Shoe",
                    "description": "",
                    "price": 9.99,
                    "quantity": 2
                }],
                "userid": "alice"
            })
        );

        Ok(())
    }

    #[test]
    fn value_total_is_a_json_number() -> TestResult {
        let total = CartValueTotal {
            user_id: UserId::from("alice"),
            total_value: Decimal::new(1998, 2),
        };

        let value = serde_json::to_value(CartValueTotalResponse::from(total))?;

        assert_eq!(value, json!({ "userid": "alice", "carttotal": 19.98 }));

        Ok(())
    }
}
