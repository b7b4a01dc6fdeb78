//! The shopping bag, stored in the visitor's session.

use serde::{Deserialize, Serialize};
use sura_core::{Price, ProductId};

use crate::catalog::Product;

/// One product in the bag, snapshotted at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    /// Primary image path relative to the catalog root, for the bag page.
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Session-scoped shopping bag.
///
/// Adding a product already in the bag bumps its quantity; lines keep
/// their insertion order so the bag page is stable across edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Add one unit of `product`, merging with an existing line if present.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.images.first().cloned(),
            quantity: 1,
        });
    }

    /// Adjust the quantity of the line at `index` by `delta`.
    ///
    /// Dropping to zero removes the line. Out-of-range indexes are ignored,
    /// which covers stale forms submitted after the bag changed.
    pub fn adjust_quantity(&mut self, index: usize, delta: i32) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        let quantity = i64::from(line.quantity) + i64::from(delta);
        if quantity <= 0 {
            self.lines.remove(index);
        } else if let Ok(quantity) = u32::try_from(quantity) {
            line.quantity = quantity;
        }
    }

    /// Remove the line at `index` entirely. Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of items (sum of quantities).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
