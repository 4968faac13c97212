//! In-memory cart for the order being built
//!
//! One [`Cart`] per order-building session, passed by `&mut` into the
//! submission workflow. Plain data over a `BTreeMap` keyed by menu item
//! id (deterministic iteration order for line persistence); no I/O, no
//! locking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed tax rate applied to the cart subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Tax-inclusive total of an integer subtotal.
///
/// The `f64 -> i64` cast truncates rather than rounds. Long-standing
/// behavior the stored order totals depend on; changing it to rounding
/// would break the round-trip against existing rows.
pub(crate) fn tax_inclusive_total(subtotal: i64) -> i64 {
    (subtotal as f64 * (1.0 + TAX_RATE)) as i64
}

/// One pending line: dish, display name, price snapshot, count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub menu_item_id: i64,
    pub name: String,
    /// Unit price at the moment the dish was added; submission persists
    /// this snapshot, never a re-read of the menu.
    pub unit_price: i64,
    pub quantity: i64,
}

/// Computed cart totals, integer currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: i64,
    pub tax: i64,
    pub grand_total: i64,
}

/// Pending order accumulator, at most one line per menu item id.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: BTreeMap<i64, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a dish. Re-adding an existing dish increments its
    /// quantity instead of duplicating the line.
    pub fn add(&mut self, menu_item_id: i64, name: &str, unit_price: i64) {
        self.lines
            .entry(menu_item_id)
            .and_modify(|line| line.quantity += 1)
            .or_insert_with(|| CartLine {
                menu_item_id,
                name: name.to_string(),
                unit_price,
                quantity: 1,
            });
    }

    /// Overwrite a line's quantity; `quantity <= 0` removes the line.
    /// No-op for a dish not in the cart.
    pub fn set_quantity(&mut self, menu_item_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.lines.remove(&menu_item_id);
        } else if let Some(line) = self.lines.get_mut(&menu_item_id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line if present; no-op otherwise.
    pub fn remove(&mut self, menu_item_id: i64) {
        self.lines.remove(&menu_item_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not total units).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in ascending menu item id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal: i64 = self
            .lines
            .values()
            .map(|line| line.unit_price * line.quantity)
            .sum();
        let grand_total = tax_inclusive_total(subtotal);
        CartTotals {
            subtotal,
            tax: grand_total - subtotal,
            grand_total,
        }
    }
}
