//! Product catalog module.
//!
//! The catalog is a collaborator of the cart: the cart only ever sees
//! finished [`ProductRef`] values built from records served here.

mod memory;
mod product;

pub use memory::{seed_products, InMemoryCatalog};
pub use product::{Product, ProductRef, PLACEHOLDER_IMAGE};

use async_trait::async_trait;

use crate::error::CommerceError;
use crate::ids::ProductId;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CommerceError>;

/// Query interface over the product record set.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All products, in listing order.
    async fn products(&self) -> CatalogResult<Vec<Product>>;

    /// A single product by id.
    async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// A single product by id, failing when it does not exist.
    async fn require(&self, id: ProductId) -> CatalogResult<Product> {
        self.product(id)
            .await?
            .ok_or(CommerceError::ProductNotFound(id))
    }
}
