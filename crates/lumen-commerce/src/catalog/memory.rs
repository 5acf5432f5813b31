//! In-memory catalog backed by a record list keyed by numeric id.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogResult, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Catalog holding its records in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Create a catalog from a record list.
    ///
    /// Fails if two records share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CommerceError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Catalog preloaded with the default product range.
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// Parse a catalog from JSON (`{"products": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.products)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the catalog to pretty JSON.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        let file = CatalogFile {
            products: self.products.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    async fn product(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

/// The default product range.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            power: Some("25W".to_string()),
            description: Some(
                "Available in 7 watts, 9 watts, 11 watts Spiral Light bulb in B22, bulb switches \
                 on instantly, no wait around warm start and flicker free features make for a \
                 great all purpose bulb"
                    .to_string(),
            ),
            quantity: Some(4),
            brand: Some("Philips".to_string()),
            weight: Some(77.0),
            height: Some(12.6),
            width: Some(6.2),
            length: Some(6.2),
            model_code: Some("E27 ES".to_string()),
            colour: Some("Cool daylight".to_string()),
            img_url: Some("https://i.ibb.co/2nzwxnQ/bulb.png".to_string()),
            ..Product::new(ProductId::new(1), "Energy saving light bulb", Money::new(1299))
        },
        Product {
            power: Some("14.4W".to_string()),
            description: Some(
                "RGB color changing LED strip light with remote control, perfect for ambient \
                 lighting. Features multiple color modes, brightness adjustment, and can be cut \
                 to custom lengths."
                    .to_string(),
            ),
            quantity: Some(8),
            brand: Some("LIFX".to_string()),
            weight: Some(120.0),
            height: Some(0.5),
            width: Some(1.0),
            length: Some(500.0),
            model_code: Some("LS-500".to_string()),
            colour: Some("Multicolor".to_string()),
            img_url: Some("https://m.media-amazon.com/images/I/61in2Vj-zKL.jpg".to_string()),
            ..Product::new(ProductId::new(2), "Smart LED Strip Light", Money::new(2499))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_lookup() {
        let catalog = InMemoryCatalog::seeded();
        assert_eq!(catalog.len(), 2);

        let strip = catalog.product(ProductId::new(2)).await.unwrap().unwrap();
        assert_eq!(strip.name, "Smart LED Strip Light");
        assert_eq!(strip.price, Money::new(2499));

        assert!(catalog.product(ProductId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_require_missing() {
        let catalog = InMemoryCatalog::seeded();
        let err = catalog.require(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(err, CommerceError::ProductNotFound(id) if id == ProductId::new(5)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "products": [
                {"id": 10, "name": "Filament bulb", "price": 599, "img_url": null},
                {"id": 11, "name": "Night light", "price": 850, "power": "0.5W", "quantity": 2}
            ]
        }"#;
        let catalog = InMemoryCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"products": [
            {"id": 1, "name": "A", "price": 1},
            {"id": 1, "name": "B", "price": 2}
        ]}"#;
        let err = InMemoryCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, CommerceError::DuplicateProduct(_)));
    }

    #[test]
    fn test_json_roundtrip_of_seed() {
        let json = InMemoryCatalog::seeded().to_json().unwrap();
        let back = InMemoryCatalog::from_json(&json).unwrap();
        assert_eq!(back.products, seed_products());
    }
}
