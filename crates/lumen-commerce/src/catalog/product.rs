//! Catalog product records and cart product references.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Image shown when a product has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/philips-plumen.jpg";

/// A product as served by the catalog backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Rated power (e.g., "25W").
    #[serde(default)]
    pub power: Option<String>,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in pence.
    pub price: Money,
    /// Units per packet.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Manufacturer.
    #[serde(default)]
    pub brand: Option<String>,
    /// Item weight in grams.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Width in centimetres.
    #[serde(default)]
    pub width: Option<f64>,
    /// Length in centimetres.
    #[serde(default)]
    pub length: Option<f64>,
    /// Manufacturer model number.
    #[serde(default)]
    pub model_code: Option<String>,
    /// Colour name.
    #[serde(default)]
    pub colour: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub img_url: Option<String>,
}

impl Product {
    /// Create a product with only the fields the cart needs.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            power: None,
            description: None,
            price,
            quantity: None,
            brand: None,
            weight: None,
            height: None,
            width: None,
            length: None,
            model_code: None,
            colour: None,
            img_url: None,
        }
    }

    /// Line under the product title, e.g. "25W // Packet of 4".
    pub fn subtitle(&self) -> String {
        format!(
            "{} // Packet of {}",
            self.power.as_deref().unwrap_or("-"),
            self.quantity.map_or_else(|| "-".to_string(), |q| q.to_string())
        )
    }

    /// Dimensions as "height x width x length", if all three are known.
    pub fn dimensions(&self) -> Option<String> {
        match (self.height, self.width, self.length) {
            (Some(h), Some(w), Some(l)) => Some(format!("{} x {} x {}", h, w, l)),
            _ => None,
        }
    }

    /// Unit price with currency symbol.
    pub fn formatted_price(&self) -> String {
        self.price.display()
    }

    /// Image URL, or the placeholder when missing.
    pub fn image_or_placeholder(&self) -> &str {
        self.img_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Build the reference the cart stores for this product.
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            id: self.id,
            name: self.name.clone(),
            unit_price: self.price,
            image_ref: self.img_url.clone(),
        }
    }
}

/// The immutable slice of a product held by a cart line item.
///
/// Identity is `id` alone: two references with the same id are the same
/// product for merging purposes, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRef {
    /// Catalog key.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price in pence.
    pub unit_price: Money,
    /// Image locator.
    pub image_ref: Option<String>,
}

impl ProductRef {
    /// Create a reference without an image.
    pub fn new(id: ProductId, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: None,
        }
    }

    /// Set the image locator.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Image locator, or the placeholder when missing.
    pub fn image_or_placeholder(&self) -> &str {
        self.image_ref.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulb() -> Product {
        Product {
            power: Some("25W".to_string()),
            quantity: Some(4),
            height: Some(12.6),
            width: Some(6.2),
            length: Some(6.2),
            img_url: Some("https://i.ibb.co/2nzwxnQ/bulb.png".to_string()),
            ..Product::new(ProductId::new(1), "Energy saving light bulb", Money::new(1299))
        }
    }

    #[test]
    fn test_subtitle() {
        assert_eq!(bulb().subtitle(), "25W // Packet of 4");
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(bulb().dimensions().as_deref(), Some("12.6 x 6.2 x 6.2"));

        let mut strip = bulb();
        strip.length = Some(500.0);
        assert_eq!(strip.dimensions().as_deref(), Some("12.6 x 6.2 x 500"));

        strip.width = None;
        assert_eq!(strip.dimensions(), None);
    }

    #[test]
    fn test_formatted_price() {
        assert_eq!(bulb().formatted_price(), "£12.99");
    }

    #[test]
    fn test_to_ref_keeps_cart_fields() {
        let product = bulb();
        let r = product.to_ref();
        assert_eq!(r.id, product.id);
        assert_eq!(r.name, product.name);
        assert_eq!(r.unit_price, Money::new(1299));
        assert_eq!(r.image_ref, product.img_url);
    }

    #[test]
    fn test_image_placeholder() {
        let r = ProductRef::new(ProductId::new(9), "Bare", Money::new(1));
        assert_eq!(r.image_or_placeholder(), PLACEHOLDER_IMAGE);
        let r = r.with_image("/bulb.png");
        assert_eq!(r.image_or_placeholder(), "/bulb.png");
    }
}
