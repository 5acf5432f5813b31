//! Session cart store and line item types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::catalog::ProductRef;
use crate::ids::{ProductId, SessionId};
use crate::money::Money;

/// A product and the number of units of it in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// The product being bought.
    pub product: ProductRef,
    /// Accumulated units, at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.product.unit_price.multiply(self.quantity)
    }
}

/// Contents of a cart.
///
/// `total_units` always equals the sum of line quantities and no two line
/// items share a product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Sum of all line quantities.
    pub total_units: u64,
}

impl CartState {
    /// Merge `quantity` units of `product` into the state.
    ///
    /// Returns true when an existing line was updated, false when a new
    /// line was appended.
    fn apply_add(&mut self, product: ProductRef, quantity: u32) -> bool {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let before = existing.quantity;
            existing.quantity = before.saturating_add(quantity);
            // Only the units the line actually gained count towards the total.
            let applied = existing.quantity - before;
            self.total_units = self.total_units.saturating_add(u64::from(applied));
            return true;
        }

        self.total_units = self.total_units.saturating_add(u64::from(quantity));
        self.items.push(LineItem { product, quantity });
        false
    }

    fn apply_clear(&mut self) {
        self.items.clear();
        self.total_units = 0;
    }

    /// Sum of line subtotals, computed on every call.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Check if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the line item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }
}

/// Handle to one session's cart.
///
/// Clones share the same state, so every display surface observes the
/// same cart. All mutation goes through [`CartStore::add`] and
/// [`CartStore::clear`]; each call is applied atomically and is visible to
/// readers as soon as it returns.
#[derive(Debug, Clone)]
pub struct CartStore {
    session: SessionId,
    state: Arc<watch::Sender<CartState>>,
}

impl CartStore {
    /// Create an empty cart for a session.
    pub fn new(session: SessionId) -> Self {
        let (tx, _rx) = watch::channel(CartState::default());
        Self {
            session,
            state: Arc::new(tx),
        }
    }

    /// Session this cart belongs to.
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    /// Add `quantity` units of `product`.
    ///
    /// A product already in the cart keeps its position and has its
    /// quantity increased; a new product is appended. A zero quantity
    /// leaves the cart untouched.
    pub fn add(&self, product: ProductRef, quantity: u32) {
        if quantity == 0 {
            tracing::debug!(
                session = %self.session,
                product_id = %product.id,
                "ignoring add with zero quantity"
            );
            return;
        }

        let product_id = product.id;
        let mut merged = false;
        let mut total_units = 0;
        self.state.send_modify(|state| {
            merged = state.apply_add(product, quantity);
            total_units = state.total_units;
        });

        tracing::info!(
            session = %self.session,
            product_id = %product_id,
            quantity,
            merged,
            total_units,
            "added to cart"
        );
    }

    /// Remove every line item.
    pub fn clear(&self) {
        self.state.send_modify(CartState::apply_clear);
        tracing::info!(session = %self.session, "cart cleared");
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Current line items in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.state.borrow().items.clone()
    }

    /// Sum of all line quantities.
    pub fn total_units(&self) -> u64 {
        self.state.borrow().total_units
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.state.borrow().items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Get the line item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<LineItem> {
        self.state.borrow().get(product_id).cloned()
    }

    /// Cart-wide total, recomputed from the current lines.
    pub fn total_price(&self) -> Money {
        self.state.borrow().total_price()
    }

    /// Receive a notification after every add or clear.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }
}
