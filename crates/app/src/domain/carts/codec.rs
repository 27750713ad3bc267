//! Cart payload decoding and encoding.
//!
//! Request bodies and stored record payloads share the same JSON shape. Unknown
//! fields are ignored and missing fields take their zero value; only empty or
//! malformed input, or input that breaks an item invariant, is rejected.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::carts::models::{Cart, Carts, Item, Items};

/// Payload written when a cart is cleared.
pub const CLEARED_PAYLOAD: &str = "[]";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty payload")]
    Empty,

    #[error("malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("item {item_id} has a negative price")]
    NegativePrice { item_id: String },
}

impl Item {
    /// Decode a single item from a request body.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is empty, is not an item object, or the
    /// item has a negative price.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let item: Item = decode_non_empty(bytes)?;

        validate_item(&item)?;

        Ok(item)
    }
}

impl Cart {
    /// Decode a whole cart from a request body.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is empty or malformed, or when any item
    /// has a negative price.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let cart: Cart = decode_non_empty(bytes)?;

        validate_items(&cart.items)?;

        Ok(cart)
    }
}

impl Items {
    /// Decode a stored record payload.
    ///
    /// Empty payloads, empty JSON objects and `null` are left behind by older
    /// clear and store operations and decode as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is neither empty nor a valid item list.
    pub fn from_payload(payload: &str) -> Result<Self, DecodeError> {
        let trimmed = payload.trim();

        if trimmed.is_empty() || is_empty_object(trimmed) {
            return Ok(Self::new());
        }

        let items: Items = serde_json::from_str(trimmed).map_err(DecodeError::Malformed)?;

        validate_items(&items)?;

        Ok(items)
    }

    /// Encode the items as a stored record payload.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decode a list of carts, as produced by the bulk listing or a seed file.
///
/// # Errors
///
/// Returns an error when the document is empty or malformed, or when any item
/// has a negative price.
pub fn decode_carts(bytes: &[u8]) -> Result<Carts, DecodeError> {
    let carts: Carts = decode_non_empty(bytes)?;

    for cart in &carts {
        validate_items(&cart.items)?;
    }

    Ok(carts)
}

fn decode_non_empty<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let trimmed = bytes.trim_ascii();

    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }

    serde_json::from_slice(trimmed).map_err(DecodeError::Malformed)
}

fn is_empty_object(payload: &str) -> bool {
    serde_json::from_str::<Map<String, Value>>(payload).is_ok_and(|object| object.is_empty())
}

fn validate_items(items: &Items) -> Result<(), DecodeError> {
    items.iter().try_for_each(validate_item)
}

fn validate_item(item: &Item) -> Result<(), DecodeError> {
    if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
        return Err(DecodeError::NegativePrice {
            item_id: item.id.clone(),
        });
    }

    Ok(())
}
