//! Dashboard statistics
//!
//! Computed by the store's stats endpoint and cached as-is. Counts are
//! never derived client-side from the loaded collection, so the panel
//! cannot drift with a stale or partial cache.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Aggregate order counts from the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    /// Counts keyed by wire status tag.
    #[serde(default)]
    pub status_counts: HashMap<String, i64>,
}

impl OrderStats {
    /// Count for one status; absent keys read as zero.
    pub fn count_for(&self, status: OrderStatus) -> i64 {
        self.status_counts
            .get(status.as_str())
            .copied()
            .unwrap_or(0)
    }
}
