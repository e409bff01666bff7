//! Product entity definitions.

use serde::{Deserialize, Serialize};

use crate::{Entity, entity::deserialize_some};

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Optional description.
    pub description: Option<String>,
}

/// Fields required to create a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBase {
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductBase {
    /// Creates a new product payload without a description.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a product.
///
/// `description` is doubly optional: an absent key keeps the stored value,
/// an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    /// New product name.
    pub name: Option<String>,
    /// New unit price.
    pub price: Option<f64>,
    /// New description.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

impl Entity for Product {
    type Base = ProductBase;
    type Patch = ProductPatch;

    const NAME: &'static str = "Product";
    const COLLECTION: &'static str = "products";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_base(id: i64, base: ProductBase) -> Self {
        Self {
            id,
            name: base.name,
            price: base.price,
            description: base.description,
        }
    }

    fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_base_description_defaults_to_none() {
        let base: ProductBase = serde_json::from_str(r#"{"name":"Lamp","price":19.5}"#).unwrap();

        assert_eq!(base, ProductBase::new("Lamp", 19.5));
    }

    #[test]
    fn test_product_patch_absent_description_is_kept() {
        let mut product = Product::from_base(
            3,
            ProductBase::new("Lamp", 19.5).with_description("Desk lamp"),
        );
        let patch: ProductPatch = serde_json::from_str(r#"{"price":17.0}"#).unwrap();

        product.apply_patch(patch);

        assert_eq!(product.price, 17.0);
        assert_eq!(product.description.as_deref(), Some("Desk lamp"));
    }

    #[test]
    fn test_product_patch_null_description_clears() {
        let mut product = Product::from_base(
            3,
            ProductBase::new("Lamp", 19.5).with_description("Desk lamp"),
        );
        let patch: ProductPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(patch.description, Some(None));

        product.apply_patch(patch);

        assert_eq!(product.name, "Lamp");
        assert!(product.description.is_none());
    }
}
