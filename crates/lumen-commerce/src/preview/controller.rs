//! Cart preview visibility and the data shown while it is open.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::{CartStore, CartSummary};
use crate::preview::{ActivationBus, ActivationEvent, PreviewLayout, Subscription};

/// Panel heading.
pub const PREVIEW_TITLE: &str = "Your Cart";

/// Shown instead of a line list when the cart has no items.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Whether the preview panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    fn from_open(open: bool) -> Self {
        if open {
            Visibility::Open
        } else {
            Visibility::Closed
        }
    }
}

/// What the presentation layer should render for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// Panel closed; only the trigger is shown.
    Hidden,
    /// Panel open on an empty cart.
    Empty,
    /// Panel open with the current lines and total.
    Items(CartSummary),
}

#[derive(Debug)]
struct PreviewState {
    open: AtomicBool,
    layout: PreviewLayout,
}

impl PreviewState {
    fn on_activation(&self, event: &ActivationEvent) {
        if self.layout.contains(event.position) {
            return;
        }
        if self.open.swap(false, Ordering::AcqRel) {
            tracing::debug!(
                x = event.position.x,
                y = event.position.y,
                "cart preview closed by outside activation"
            );
        }
    }
}

/// Visibility state of the transient cart summary panel.
///
/// Starts closed. The trigger toggles it; an activation outside the trigger
/// and panel closes it. Cart contents never change visibility.
#[derive(Debug, Clone)]
pub struct PreviewController {
    store: CartStore,
    state: Arc<PreviewState>,
}

impl PreviewController {
    /// Create a closed preview over `store`, hit-tested against `layout`.
    pub fn new(store: CartStore, layout: PreviewLayout) -> Self {
        Self {
            store,
            state: Arc::new(PreviewState {
                open: AtomicBool::new(false),
                layout,
            }),
        }
    }

    /// Start listening for page-wide activations on `bus`.
    ///
    /// The listener is removed when the returned handle is dropped or
    /// unmounted.
    pub fn mount(self, bus: &ActivationBus) -> MountedPreview {
        let state = Arc::clone(&self.state);
        let subscription = bus.subscribe(move |event| state.on_activation(event));
        tracing::debug!(session = %self.store.session(), "cart preview mounted");
        MountedPreview {
            controller: self,
            _subscription: subscription,
        }
    }

    /// Trigger activation: open when closed, close when open.
    pub fn toggle(&self) -> Visibility {
        let was_open = self.state.open.fetch_xor(true, Ordering::AcqRel);
        let now = Visibility::from_open(!was_open);
        tracing::debug!(session = %self.store.session(), visibility = ?now, "cart preview toggled");
        now
    }

    /// Handle an activation anywhere on the page.
    ///
    /// Closes an open preview when the event lies outside the current
    /// trigger and panel bounds. Mounted controllers receive this from the
    /// bus; it is public for surfaces that route events themselves.
    pub fn handle_activation(&self, event: &ActivationEvent) {
        self.state.on_activation(event);
    }

    /// Current visibility.
    pub fn visibility(&self) -> Visibility {
        Visibility::from_open(self.is_open())
    }

    /// Whether the panel is showing.
    pub fn is_open(&self) -> bool {
        self.state.open.load(Ordering::Acquire)
    }

    /// Bounds used for inside/outside decisions.
    pub fn layout(&self) -> &PreviewLayout {
        &self.state.layout
    }

    /// Cart this preview summarises.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Unit count for the trigger badge; `None` hides the badge.
    pub fn badge(&self) -> Option<u64> {
        Some(self.store.total_units()).filter(|&units| units > 0)
    }

    /// Content to render, derived from the cart as it is now.
    pub fn view(&self) -> PreviewView {
        if !self.is_open() {
            return PreviewView::Hidden;
        }
        let summary = CartSummary::from_state(&self.store.snapshot());
        if summary.is_empty() {
            PreviewView::Empty
        } else {
            PreviewView::Items(summary)
        }
    }
}

/// A preview that is listening on an activation bus.
#[derive(Debug)]
pub struct MountedPreview {
    controller: PreviewController,
    _subscription: Subscription,
}

impl MountedPreview {
    /// Stop listening and hand back the controller.
    pub fn unmount(self) -> PreviewController {
        tracing::debug!(session = %self.controller.store.session(), "cart preview unmounted");
        self.controller
    }
}

impl Deref for MountedPreview {
    type Target = PreviewController;

    fn deref(&self) -> &PreviewController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRef;
    use crate::ids::{ProductId, SessionId};
    use crate::money::Money;
    use crate::preview::Rect;

    const TRIGGER: Rect = Rect::new(900, 10, 24, 24);
    const PANEL: Rect = Rect::new(700, 40, 260, 320);

    fn setup() -> (CartStore, PreviewLayout, ActivationBus) {
        let store = CartStore::new(SessionId::new("sess-preview"));
        let layout = PreviewLayout::with_trigger(TRIGGER);
        (store, layout, ActivationBus::new())
    }

    #[test]
    fn test_starts_closed() {
        let (store, layout, _) = setup();
        let preview = PreviewController::new(store, layout);
        assert_eq!(preview.visibility(), Visibility::Closed);
        assert_eq!(preview.view(), PreviewView::Hidden);
    }

    #[test]
    fn test_toggle() {
        let (store, layout, _) = setup();
        let preview = PreviewController::new(store, layout);
        assert_eq!(preview.toggle(), Visibility::Open);
        assert!(preview.is_open());
        assert_eq!(preview.toggle(), Visibility::Closed);
        assert!(!preview.is_open());
    }

    #[test]
    fn test_outside_activation_closes() {
        let (store, layout, bus) = setup();
        let preview = PreviewController::new(store, layout.clone()).mount(&bus);
        preview.toggle();
        layout.set_panel(Some(PANEL));

        bus.dispatch(ActivationEvent::at(5, 500));
        assert!(!preview.is_open());
    }

    #[test]
    fn test_inside_panel_stays_open() {
        let (store, layout, bus) = setup();
        let preview = PreviewController::new(store, layout.clone()).mount(&bus);
        preview.toggle();
        layout.set_panel(Some(PANEL));

        bus.dispatch(ActivationEvent::at(750, 100));
        assert!(preview.is_open());

        bus.dispatch(ActivationEvent::at(905, 15));
        assert!(preview.is_open());
    }

    #[test]
    fn test_outside_activation_when_closed_is_noop() {
        let (store, layout, bus) = setup();
        let preview = PreviewController::new(store, layout).mount(&bus);
        bus.dispatch(ActivationEvent::at(0, 0));
        assert_eq!(preview.visibility(), Visibility::Closed);
    }

    #[test]
    fn test_unmount_removes_listener() {
        let (store, layout, bus) = setup();
        let preview = PreviewController::new(store, layout).mount(&bus);
        assert_eq!(bus.listener_count(), 1);

        let controller = preview.unmount();
        assert_eq!(bus.listener_count(), 0);

        // No longer listening: outside presses leave it open
        controller.toggle();
        bus.dispatch(ActivationEvent::at(0, 0));
        assert!(controller.is_open());
    }

    #[test]
    fn test_view_empty_and_items() {
        let (store, layout, _) = setup();
        let preview = PreviewController::new(store.clone(), layout);
        preview.toggle();
        assert_eq!(preview.view(), PreviewView::Empty);

        store.add(
            ProductRef::new(ProductId::new(1), "Test Product", Money::new(1000)),
            1,
        );
        match preview.view() {
            PreviewView::Items(summary) => {
                assert_eq!(summary.lines.len(), 1);
                assert_eq!(summary.lines[0].subtotal_display(), "£10.00");
                assert_eq!(summary.total_display(), "£10.00");
            }
            other => panic!("expected items, got {:?}", other),
        }
    }

    #[test]
    fn test_badge_hidden_when_empty() {
        let (store, layout, _) = setup();
        let preview = PreviewController::new(store.clone(), layout);
        assert_eq!(preview.badge(), None);

        store.add(ProductRef::new(ProductId::new(1), "A", Money::new(1)), 3);
        assert_eq!(preview.badge(), Some(3));
    }

    #[test]
    fn test_cart_changes_do_not_touch_visibility() {
        let (store, layout, _) = setup();
        let preview = PreviewController::new(store.clone(), layout);
        preview.toggle();
        store.add(ProductRef::new(ProductId::new(1), "A", Money::new(1)), 1);
        store.clear();
        assert!(preview.is_open());
    }
}
