//! # Order Review
//!
//! [`OrderBoard`] lists every order on the service and lets an administrator
//! mark one as delivered. Status text is kept on the board the way the
//! ordering desk keeps its report.

use crate::api::{ApiError, CatalogService};
use crate::model::{OrderId, OrderRecord, DEFAULT_ORDER_STATUS};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Shown in place of a date the service did not send.
pub const DATE_NOT_SET: &str = "not set";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderBoardError {
    #[error("Error fetching orders: {}", .0.detail())]
    Fetch(ApiError),

    #[error("Error updating order {id}: {}", .source.detail())]
    Update { id: u32, source: ApiError },
}

pub struct OrderBoard {
    service: Arc<dyn CatalogService>,
    orders: Vec<OrderRecord>,
    is_loading: bool,
    error: Option<OrderBoardError>,
    status: Option<String>,
}

impl OrderBoard {
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self {
            service,
            orders: Vec::new(),
            is_loading: false,
            error: None,
            status: None,
        }
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&OrderBoardError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) {
        self.is_loading = true;
        match self.service.list_orders().await {
            Ok(orders) => {
                self.orders = orders;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Order fetch failed");
                self.error = Some(OrderBoardError::Fetch(e));
            }
        }
        self.is_loading = false;
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&mut self, id: OrderId) {
        self.is_loading = true;
        match self.service.update_order_status(id).await {
            Ok(()) => {
                info!(%id, "Order delivered");
                self.status = Some(format!("Order {} updated to Delivered", id.0));
                self.error = None;
                self.refresh().await;
            }
            Err(source) => {
                warn!(%id, error = %source, "Order update failed");
                self.status = None;
                self.error = Some(OrderBoardError::Update { id: id.0, source });
            }
        }
        self.is_loading = false;
    }
}

/// One human-readable line per order.
pub fn describe(order: &OrderRecord) -> String {
    let status = if order.status.trim().is_empty() {
        DEFAULT_ORDER_STATUS
    } else {
        order.status.as_str()
    };
    format!(
        "#{} {} x{} total {:.2} | ordered: {} | delivered: {} | status: {}",
        order.id.0,
        order.product,
        order.quantity,
        order.total,
        order.ordered_at.as_deref().unwrap_or(DATE_NOT_SET),
        order.delivered_at.as_deref().unwrap_or(DATE_NOT_SET),
        status,
    )
}
