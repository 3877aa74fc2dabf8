//! # Catalog Administration
//!
//! [`CatalogDesk`] backs the administrator's product views: list, add, edit
//! and delete. Input is validated locally before anything is sent, and every
//! successful change is followed by a fresh listing so the desk never shows a
//! locally patched copy of a product.

pub mod error;

pub use error::*;

use crate::api::CatalogService;
use crate::model::{NewProduct, Product, ProductId, ProductPatch};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// State holder behind the catalog views.
pub struct CatalogDesk {
    service: Arc<dyn CatalogService>,
    products: Vec<Product>,
    is_loading: bool,
    error: Option<CatalogError>,
    success: bool,
}

impl CatalogDesk {
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self {
            service,
            products: Vec::new(),
            is_loading: false,
            error: None,
            success: false,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    /// Whether the last add/update/delete went through.
    pub fn success(&self) -> bool {
        self.success
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.is_loading = true;
        self.error = None;
        match self.service.list_products().await {
            Ok(products) => {
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                self.error = Some(CatalogError::Fetch(e));
            }
        }
        self.is_loading = false;
    }

    /// Adds a product from raw form input.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, name: &str, price: &str, image: Option<String>) {
        self.begin();
        let product = match validate_new(name, price, image) {
            Ok(product) => product,
            Err(e) => return self.fail(e),
        };
        match self.service.create_product(&product).await {
            Ok(()) => {
                info!(name = %product.name, "Product added");
                self.succeed().await;
            }
            Err(e) => self.fail(CatalogError::Save(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_product(&mut self, id: ProductId, name: Option<&str>, price: Option<&str>) {
        self.begin();
        let patch = match validate_patch(name, price) {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };
        match self.service.update_product(id, &patch).await {
            Ok(()) => {
                info!(%id, "Product updated");
                self.succeed().await;
            }
            Err(e) => self.fail(CatalogError::Save(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) {
        self.begin();
        match self.service.delete_product(id).await {
            Ok(()) => {
                info!(%id, "Product deleted");
                self.succeed().await;
            }
            Err(e) => self.fail(CatalogError::Delete(e)),
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.success = false;
    }

    fn fail(&mut self, error: CatalogError) {
        warn!(error = %error, "Catalog change failed");
        self.error = Some(error);
        self.is_loading = false;
    }

    async fn succeed(&mut self) {
        self.success = true;
        self.refresh().await;
    }
}

pub fn parse_price(raw: &str) -> Result<f64, CatalogError> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(CatalogError::InvalidPrice(raw.to_string())),
    }
}

fn validate_new(name: &str, price: &str, image: Option<String>) -> Result<NewProduct, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::MissingName);
    }
    Ok(NewProduct {
        name: name.to_string(),
        price: parse_price(price)?,
        image: image.filter(|i| !i.trim().is_empty()),
    })
}

fn validate_patch(name: Option<&str>, price: Option<&str>) -> Result<ProductPatch, CatalogError> {
    let name = match name.map(str::trim) {
        Some("") => return Err(CatalogError::MissingName),
        other => other.map(str::to_string),
    };
    let patch = ProductPatch {
        name,
        price: price.map(parse_price).transpose()?,
    };
    if patch.is_empty() {
        return Err(CatalogError::EmptyUpdate);
    }
    Ok(patch)
}
