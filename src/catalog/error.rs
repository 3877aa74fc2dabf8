//! Error types for catalog administration.

use crate::api::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product name is required")]
    MissingName,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Nothing to update")]
    EmptyUpdate,

    #[error("Error fetching products: {0}")]
    Fetch(ApiError),

    #[error("Error saving product: {0}")]
    Save(ApiError),

    #[error("Error deleting product: {0}")]
    Delete(ApiError),
}
