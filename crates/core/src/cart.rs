//! Session cart state.
//!
//! A cart is a list of artwork snapshots with quantities. Totals are derived
//! from the items on every read and never stored. There is no reconciliation
//! against artwork availability.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ArtistId, ArtworkId, CurrencyCode};

/// A line in the cart: a snapshot of the artwork taken when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub artwork_id: ArtworkId,
    pub title: String,
    pub artist_id: ArtistId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Unit price. Items without a price contribute nothing to the total.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    pub quantity: u32,
}

impl CartItem {
    /// Line total, `price * quantity`, or zero for unpriced items.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .map_or(Decimal::ZERO, |price| price * Decimal::from(self.quantity))
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The item's quantity was set to the given value.
    Updated(u32),
    /// A non-positive quantity removed the item.
    Removed,
    /// No item with that artwork id is in the cart.
    NotInCart,
}

/// A buyer's cart for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    #[serde(default)]
    currency: CurrencyCode,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add an item.
    ///
    /// Adding an artwork that is already in the cart leaves the cart
    /// untouched, including the existing quantity. Returns `true` when the
    /// item was inserted. A quantity of zero is stored as one.
    pub fn add(&mut self, mut item: CartItem) -> bool {
        if self.contains(&item.artwork_id) {
            return false;
        }
        item.quantity = item.quantity.max(1);
        self.items.push(item);
        true
    }

    /// Remove the item for `artwork_id`. Returns `true` if something was removed.
    pub fn remove(&mut self, artwork_id: &ArtworkId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.artwork_id != artwork_id);
        self.items.len() != before
    }

    /// Set the quantity for `artwork_id`; `quantity <= 0` removes the item.
    pub fn set_quantity(&mut self, artwork_id: &ArtworkId, quantity: i64) -> QuantityChange {
        if !self.contains(artwork_id) {
            return QuantityChange::NotInCart;
        }

        if quantity <= 0 {
            self.remove(artwork_id);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.artwork_id == artwork_id)
        {
            item.quantity = quantity;
        }
        QuantityChange::Updated(quantity)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price * quantity` over all items.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    #[must_use]
    pub fn contains(&self, artwork_id: &ArtworkId) -> bool {
        self.items.iter().any(|item| &item.artwork_id == artwork_id)
    }

    #[must_use]
    pub fn get(&self, artwork_id: &ArtworkId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.artwork_id == artwork_id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Number of distinct line items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
