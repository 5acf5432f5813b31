//! Shopping cart module.
//!
//! Contains the session cart store, its derived pricing summary, the
//! add-to-cart submission control and the quantity picker.

mod pricing;
mod quantity;
mod store;
mod submit;

pub use pricing::{CartSummary, LineSummary};
pub use quantity::{QuantityPicker, MAX_PICK_QUANTITY, MIN_PICK_QUANTITY};
pub use store::{CartState, CartStore, LineItem};
pub use submit::{AddToCartControl, SubmitOutcome, DEFAULT_ADD_LATENCY};
