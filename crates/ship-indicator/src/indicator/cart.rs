use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only cart figures supplied for a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub grand_total: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub subtotal_with_discount: f64,
    #[serde(default)]
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn has_items(&self) -> bool {
        self.item_count > 0
    }

    /// Derives a snapshot from widget totals; the discount is applied as a signed adjustment.
    pub fn from_segments(segments: &TotalsSegments) -> Self {
        let subtotal_with_discount = match segments.discount_amount {
            Some(discount) => segments.subtotal + discount,
            None => segments.subtotal,
        };

        Self {
            grand_total: segments.grand_total,
            subtotal: segments.subtotal,
            subtotal_with_discount,
            item_count: segments.items_qty,
        }
    }
}

/// Cart totals as the checkout widget receives them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TotalsSegments {
    #[serde(default)]
    pub grand_total: f64,
    #[serde(default)]
    pub subtotal: f64,
    /// Usually negative.
    #[serde(default)]
    pub discount_amount: Option<f64>,
    #[serde(default)]
    pub items_qty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartId(pub String);

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session-side cart lookup.
pub trait CartSource: Send + Sync {
    fn snapshot(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, CartSourceError>;
}

/// Cart lookup failure.
#[derive(Debug, thiserror::Error)]
pub enum CartSourceError {
    #[error("cart source unavailable: {0}")]
    Unavailable(String),
}
