//! Cart Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    slice::Iter,
    vec::IntoIter,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// User identifier; the sole partition key of a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap a caller-supplied user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Item Model
///
/// A single line in a cart. The `id` is supplied by the caller and is never
/// generated by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(rename = "itemid")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u64,
}

impl Item {
    /// `quantity * unit_price` for this line.
    #[must_use]
    pub fn line_value(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Ordered list of cart lines.
///
/// Duplicate ids are allowed here; the manager's update logic decides how they
/// are resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Items(Vec<Item>);

/// A JSON `null` list reads as an empty cart.
impl<'de> Deserialize<'de> for Items {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<Vec<Item>>::deserialize(deserializer).map(|items| Self(items.unwrap_or_default()))
    }
}

impl Items {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item without checking for an existing id.
    pub fn push(&mut self, item: Item) {
        self.0.push(item);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Item> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Item] {
        &self.0
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.0
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of `quantity * unit_price` over all lines.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_value()))
    }

    /// Replace every line whose id matches `replacement.id` and return how many
    /// lines were replaced.
    ///
    /// A replacement that matches nothing is dropped; it is never appended.
    pub fn replace_matching(&mut self, replacement: &Item) -> usize {
        let mut replaced = 0;

        for item in self.0.iter_mut().filter(|item| item.id == replacement.id) {
            item.clone_from(replacement);
            replaced += 1;
        }

        replaced
    }
}

impl From<Vec<Item>> for Items {
    fn from(items: Vec<Item>) -> Self {
        Self(items)
    }
}

impl From<Items> for Vec<Item> {
    fn from(items: Items) -> Self {
        items.0
    }
}

impl FromIterator<Item> for Items {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Items {
    type Item = Item;
    type IntoIter = IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Items {
    type Item = &'a Item;
    type IntoIter = Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cart Model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cart {
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "cart")]
    pub items: Items,
}

/// All stored carts, one per user, in no guaranteed order.
pub type Carts = Vec<Cart>;

/// Number of items in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemTotal {
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "cartitemtotal")]
    pub total_items: u64,
}

/// Monetary value of a user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartValueTotal {
    #[serde(rename = "userid")]
    pub user_id: UserId,
    #[serde(rename = "carttotal", with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}
