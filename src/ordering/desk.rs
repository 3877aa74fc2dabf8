use crate::api::CatalogService;
use crate::model::{cart_total, CartLine, ProductId};
use crate::ordering::{submit_order, OrderReport, OrderingError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// State holder behind the "make order" view.
///
/// Owns the cart for as long as the view is open. Every remote operation sets
/// `is_loading` for its duration and leaves its verdict in `error` (a user
/// facing message) and, after a submission, in `status` (the report text).
pub struct OrderDesk {
    service: Arc<dyn CatalogService>,
    lines: Vec<CartLine>,
    is_loading: bool,
    error: Option<OrderingError>,
    status: Option<String>,
}

impl OrderDesk {
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self {
            service,
            lines: Vec::new(),
            is_loading: false,
            error: None,
            status: None,
        }
    }

    /// Fetches the catalog and starts a fresh cart with every quantity at 0.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error = None;
        match self.service.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "Cart loaded");
                self.lines = products.into_iter().map(CartLine::new).collect();
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                self.error = Some(OrderingError::Catalog(e));
            }
        }
        self.is_loading = false;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&OrderingError> {
        self.error.as_ref()
    }

    /// Text of the last submission report, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn total_amount(&self) -> f64 {
        cart_total(&self.lines)
    }

    pub fn set_quantity(&mut self, product: ProductId, quantity: u32) -> Result<(), OrderingError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id() == product)
            .ok_or(OrderingError::UnknownProduct(product))?;
        line.set_quantity(quantity);
        debug!(%product, quantity, total = self.total_amount(), "Quantity updated");
        Ok(())
    }

    /// Looks a line up by product name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.product.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Submits the cart and records the outcome.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self) -> OrderReport {
        self.is_loading = true;
        self.status = None;

        if !self.lines.iter().any(CartLine::is_eligible) {
            self.error = Some(OrderingError::EmptySelection);
            self.is_loading = false;
            return OrderReport::default();
        }

        let report = submit_order(&self.service, &mut self.lines).await;
        self.status = Some(report.text());
        self.error = report
            .has_failures()
            .then_some(OrderingError::PartialFailure);
        self.is_loading = false;
        report
    }
}
