//! Add-to-cart control with a simulated backend round trip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cart::CartStore;
use crate::catalog::ProductRef;

/// Latency applied before an add commits.
pub const DEFAULT_ADD_LATENCY: Duration = Duration::from_millis(300);

/// Result of pressing the add-to-cart control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The add was committed to the cart.
    Added,
    /// Another submission was still in flight; nothing happened.
    Busy,
}

/// The "Add to cart" button of a product view.
///
/// While a submission is pending the control reports itself busy and
/// rejects further presses, so one press can only ever add once. Clones
/// share the in-flight flag.
#[derive(Debug, Clone)]
pub struct AddToCartControl {
    store: CartStore,
    latency: Duration,
    in_flight: Arc<AtomicBool>,
}

impl AddToCartControl {
    /// Create a control committing into `store`.
    pub fn new(store: CartStore) -> Self {
        Self {
            store,
            latency: DEFAULT_ADD_LATENCY,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Configured latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Wait out the latency, then add `quantity` units of `product`.
    pub async fn submit(&self, product: ProductRef, quantity: u32) -> SubmitOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!(
                session = %self.store.session(),
                product_id = %product.id,
                "add-to-cart already in flight"
            );
            return SubmitOutcome::Busy;
        };

        tracing::debug!(
            session = %self.store.session(),
            product_id = %product.id,
            latency_ms = self.latency.as_millis() as u64,
            "add-to-cart pending"
        );
        tokio::time::sleep(self.latency).await;
        self.store.add(product, quantity);
        SubmitOutcome::Added
    }

    /// Whether a submission is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the control accepts presses.
    pub fn is_enabled(&self) -> bool {
        !self.is_busy()
    }

    /// Button caption for the current state.
    pub fn label(&self) -> &'static str {
        if self.is_busy() {
            "Adding..."
        } else {
            "Add to cart"
        }
    }
}

/// Holds the in-flight flag; releases it on drop, including when the
/// submitting future is cancelled.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
