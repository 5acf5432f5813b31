//! Cart preview module.
//!
//! A transient summary panel anchored to a trigger (the basket icon). The
//! trigger toggles it; any activation outside the trigger and panel closes
//! it.

mod controller;
mod events;
mod region;

pub use controller::{
    MountedPreview, PreviewController, PreviewView, Visibility, EMPTY_CART_MESSAGE, PREVIEW_TITLE,
};
pub use events::{ActivationBus, ActivationEvent, Subscription};
pub use region::{Point, PreviewLayout, Rect};
