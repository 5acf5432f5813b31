//! Commerce error types.
//!
//! Cart and preview operations are total; only the catalog and its loaders
//! report errors.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Duplicate product id in a catalog record set.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    /// Catalog backend failure.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading catalog data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
