//! Cart aggregation and presentation engine for the Lumen storefront.
//!
//! This crate provides the types a storefront front end builds on:
//!
//! - **Catalog**: Product records and the references the cart holds
//! - **Cart**: Session cart store with merge-by-id line items and totals
//! - **Preview**: Cart preview visibility with outside-click dismissal
//!
//! # Example
//!
//! ```rust
//! use lumen_commerce::prelude::*;
//!
//! let cart = CartStore::new(SessionId::new("sess_demo"));
//! let bulb = ProductRef::new(ProductId::new(1), "Energy saving light bulb", Money::new(1299));
//!
//! cart.add(bulb.clone(), 1);
//! cart.add(bulb, 2);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total_units(), 3);
//! assert_eq!(cart.total_price().display(), "£38.97");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod preview;

pub use error::CommerceError;
pub use ids::{ProductId, SessionId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{ProductId, SessionId};
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, InMemoryCatalog, Product, ProductRef};

    // Cart
    pub use crate::cart::{
        AddToCartControl, CartState, CartStore, CartSummary, LineItem, LineSummary,
        QuantityPicker, SubmitOutcome,
    };

    // Preview
    pub use crate::preview::{
        ActivationBus, ActivationEvent, MountedPreview, Point, PreviewController, PreviewLayout,
        PreviewView, Rect, Visibility,
    };
}
