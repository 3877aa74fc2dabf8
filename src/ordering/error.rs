//! Error types for order placement.

use crate::api::ApiError;
use crate::model::ProductId;
use thiserror::Error;

/// Errors the order desk reports to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderingError {
    /// Nothing in the cart has a quantity above zero.
    #[error("No products selected for ordering.")]
    EmptySelection,

    /// At least one line of a submission failed; the report has the details.
    #[error("Some orders failed. See details below.")]
    PartialFailure,

    /// A quantity edit named a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    UnknownProduct(ProductId),

    /// The catalog could not be loaded.
    #[error("Error fetching products: {0}")]
    Catalog(#[from] ApiError),
}
