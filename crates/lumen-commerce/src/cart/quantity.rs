//! Quantity picker for the product detail view.
//!
//! The cart itself accepts any positive quantity; the 1..=99 bound lives
//! here, in the control that produces the quantity.

use serde::{Deserialize, Serialize};

/// Smallest quantity the picker offers.
pub const MIN_PICK_QUANTITY: u32 = 1;

/// Largest quantity the picker offers.
pub const MAX_PICK_QUANTITY: u32 = 99;

/// Increment/decrement control clamped to a fixed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPicker {
    value: u32,
    max: u32,
}

impl QuantityPicker {
    /// Picker starting at 1 with the default upper bound.
    pub fn new() -> Self {
        Self::with_max(MAX_PICK_QUANTITY)
    }

    /// Picker with a custom upper bound (never below 1).
    pub fn with_max(max: u32) -> Self {
        Self {
            value: MIN_PICK_QUANTITY,
            max: max.max(MIN_PICK_QUANTITY),
        }
    }

    /// Current quantity.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Step up by one, stopping at the upper bound.
    pub fn increment(&mut self) -> u32 {
        self.value = (self.value + 1).min(self.max);
        self.value
    }

    /// Step down by one, stopping at 1.
    pub fn decrement(&mut self) -> u32 {
        self.value = self.value.saturating_sub(1).max(MIN_PICK_QUANTITY);
        self.value
    }

    /// Set an arbitrary value, clamped into range.
    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value.clamp(MIN_PICK_QUANTITY, self.max);
        self.value
    }

    /// Whether the "+" button is enabled.
    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    /// Whether the "-" button is enabled.
    pub fn can_decrement(&self) -> bool {
        self.value > MIN_PICK_QUANTITY
    }
}

impl Default for QuantityPicker {
    fn default() -> Self {
        Self::new()
    }
}
