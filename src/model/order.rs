/// Order payloads and the read-only order records owned by the service.
///
/// The service keys orders by product *name* rather than product id, and
/// reports totals either as JSON numbers or as decimal strings depending on
/// the backing column type. [`OrderRecord`] accepts both.
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Status the service assigns to orders that have not been delivered.
pub const DEFAULT_ORDER_STATUS: &str = "pending";
pub const DELIVERED_ORDER_STATUS: &str = "delivered";

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Payload for creating a new order. Built per submission and never retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub product: String,
    #[serde(rename = "amount")]
    pub quantity: u32,
    pub total: f64,
}

impl OrderRequest {
    pub fn new(product: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product: product.into(),
            quantity,
            total: unit_price * f64::from(quantity),
        }
    }
}

/// An order as reported by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub product: String,
    #[serde(rename = "amount", alias = "quantity")]
    pub quantity: u32,
    #[serde(deserialize_with = "number_or_string")]
    pub total: f64,
    #[serde(rename = "orderDate", default)]
    pub ordered_at: Option<String>,
    #[serde(rename = "deliveryDate", default)]
    pub delivered_at: Option<String>,
    #[serde(rename = "orderStatus", default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
}

impl OrderRecord {
    /// Delivered when the service stamped a delivery date or reports the
    /// delivered status. Other statuses (`cancelled`, `shipped`, ...) are not.
    pub fn is_delivered(&self) -> bool {
        self.delivered_at.is_some()
            || self
                .status
                .trim()
                .eq_ignore_ascii_case(DELIVERED_ORDER_STATUS)
    }
}

fn default_status() -> String {
    DEFAULT_ORDER_STATUS.to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let status = Option::<String>::deserialize(deserializer)?;
    Ok(status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default_status))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Total {
        Number(f64),
        Text(String),
    }

    match Total::deserialize(deserializer)? {
        Total::Number(n) => Ok(n),
        Total::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid total {s:?}: {e}"))),
    }
}
