//! # Order Submission Coordinator
//!
//! Fans a cart out into one `create_order` call per eligible line, waits for
//! all of them, and folds the outcomes into an [`OrderReport`].
//!
//! Each line runs in its own Tokio task and hands its outcome back through its
//! `JoinHandle`; nothing is appended to a shared list. Handles are joined in
//! cart order, so the report lists lines in the order the user sees them no
//! matter which request finishes first.

use crate::api::{ApiError, CatalogService};
use crate::model::CartLine;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// How a single line fared.
#[derive(Debug, Clone, PartialEq)]
pub enum LineStatus {
    Placed,
    Failed(ApiError),
    /// The submission task died before reporting (panic or runtime shutdown).
    Aborted(String),
}

/// Outcome of one submitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    pub product: String,
    pub status: LineStatus,
}

impl LineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, LineStatus::Placed)
    }
}

impl Display for LineOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.status {
            LineStatus::Placed => write!(f, "Order for {} placed successfully!", self.product),
            LineStatus::Failed(e) if e.is_network() => {
                write!(f, "Network error ordering {}: {}", self.product, e.detail())
            }
            LineStatus::Failed(e) => write!(f, "Error ordering {}: {}", self.product, e.detail()),
            LineStatus::Aborted(reason) => write!(
                f,
                "Error ordering {}: submission aborted: {}",
                self.product, reason
            ),
        }
    }
}

/// The aggregate result of one submission: one outcome per eligible line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderReport {
    pub outcomes: Vec<LineOutcome>,
}

impl OrderReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn placed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.placed()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Status lines joined with newlines.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl Display for OrderReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, outcome) in self.outcomes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{outcome}")?;
        }
        Ok(())
    }
}

/// Submits every line with a quantity above zero and waits for all of them.
///
/// Lines that were placed get their quantity reset to 0; failed lines keep
/// theirs so the user can resubmit. With no eligible line this returns an
/// empty report without touching the service.
#[instrument(skip_all, fields(lines = lines.len()))]
pub async fn submit_order(service: &Arc<dyn CatalogService>, lines: &mut [CartLine]) -> OrderReport {
    let eligible: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_eligible())
        .map(|(i, _)| i)
        .collect();

    if eligible.is_empty() {
        info!("Nothing to submit");
        return OrderReport::default();
    }
    info!(eligible = eligible.len(), "Submitting order");

    let handles: Vec<_> = eligible
        .iter()
        .map(|&i| {
            let service = Arc::clone(service);
            let request = lines[i].to_request();
            tokio::spawn(async move { service.create_order(&request).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (&i, handle) in eligible.iter().zip(handles) {
        let product = lines[i].product.name.clone();
        let status = match handle.await {
            Ok(Ok(())) => {
                info!(%product, "Line placed");
                lines[i].set_quantity(0);
                LineStatus::Placed
            }
            Ok(Err(e)) => {
                warn!(%product, error = %e, "Line failed");
                LineStatus::Failed(e)
            }
            Err(e) => {
                warn!(%product, error = %e, "Line task aborted");
                LineStatus::Aborted(e.to_string())
            }
        };
        outcomes.push(LineOutcome { product, status });
    }

    let report = OrderReport { outcomes };
    info!(
        placed = report.placed(),
        failed = report.failed(),
        "Submission finished"
    );
    report
}
