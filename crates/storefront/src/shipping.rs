//! Shipping cost table.

use sura_core::Price;

/// Orders of this many items or more ship free.
pub const FREE_SHIPPING_ITEM_COUNT: u32 = 5;

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_SUBTOTAL_DOLLARS: i64 = 50;

/// Quote shipping for a bag of `item_count` items totalling `subtotal`.
///
/// Free-shipping thresholds are checked before the per-count table, so a
/// four-item bag of pricier pieces can still ship free on subtotal alone.
/// Counts outside the table (0, or anything at/above the free threshold
/// that somehow missed it) quote zero.
#[must_use]
pub fn quote(item_count: u32, subtotal: Price) -> Price {
    if item_count >= FREE_SHIPPING_ITEM_COUNT
        || subtotal >= Price::from_dollars(FREE_SHIPPING_SUBTOTAL_DOLLARS)
    {
        return Price::ZERO;
    }
    match item_count {
        1 => Price::from_dollars(6),
        2 => Price::from_dollars(7),
        3 => Price::from_dollars(8),
        4 => Price::from_dollars(9),
        _ => Price::ZERO,
    }
}
