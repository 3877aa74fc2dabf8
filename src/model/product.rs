/// Represents a product in the remote catalog.
///
/// Products are immutable once fetched: the client never edits a `Product` in
/// place, it sends a [`NewProduct`] or [`ProductPatch`] and re-reads the catalog.
///
/// The service speaks Spanish field names (`nombre`, `precio`, `imagen`); the
/// serde attributes map them onto the Rust names and also accept the English
/// spellings.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "precio", alias = "price")]
    pub price: f64,
    #[serde(
        rename = "imagen",
        alias = "image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the service
    /// * `name` - Product name
    /// * `price` - Unit price
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Payload for adding a product to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial update for an existing product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}
