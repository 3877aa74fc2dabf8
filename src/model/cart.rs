use crate::model::{OrderRequest, Product, ProductId};

/// A product paired with the quantity the user wants to order.
///
/// The quantity is the only mutable part; the line total is derived from it on
/// every read, so `total() == price * quantity` holds after any edit.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    quantity: u32,
}

impl CartLine {
    /// Creates an empty line (quantity 0) for a freshly loaded product.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 0,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }

    /// Lines with nothing requested are never submitted.
    pub fn is_eligible(&self) -> bool {
        self.quantity > 0
    }

    pub fn to_request(&self) -> OrderRequest {
        OrderRequest::new(self.product.name.clone(), self.quantity, self.product.price)
    }
}

/// Sum of all line totals.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::total).sum()
}
