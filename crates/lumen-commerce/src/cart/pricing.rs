//! Cart pricing summary for display surfaces.

use serde::{Deserialize, Serialize};

use crate::cart::{CartState, LineItem};
use crate::ids::ProductId;
use crate::money::Money;

/// Totals breakdown derived from a cart state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSummary {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineSummary>,
    /// Sum of all line quantities.
    pub total_units: u64,
    /// Sum of all line subtotals.
    pub total: Money,
}

impl CartSummary {
    /// Derive a summary from the given state.
    pub fn from_state(state: &CartState) -> Self {
        Self {
            lines: state.items.iter().map(LineSummary::from_item).collect(),
            total_units: state.total_units,
            total: state.total_price(),
        }
    }

    /// Check if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart total with currency symbol.
    pub fn total_display(&self) -> String {
        self.total.display()
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineSummary {
    /// Product key.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Image to show, placeholder included.
    pub image: String,
    /// Units of this product.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Money,
    /// Unit price times quantity.
    pub subtotal: Money,
}

impl LineSummary {
    fn from_item(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id,
            name: item.product.name.clone(),
            image: item.product.image_or_placeholder().to_string(),
            quantity: item.quantity,
            unit_price: item.product.unit_price,
            subtotal: item.subtotal(),
        }
    }

    /// Quantity label, e.g. "Qty: 2".
    pub fn quantity_label(&self) -> String {
        format!("Qty: {}", self.quantity)
    }

    /// Subtotal with currency symbol.
    pub fn subtotal_display(&self) -> String {
        self.subtotal.display()
    }
}
