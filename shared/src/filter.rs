//! Collection filtering
//!
//! Pure, client-side narrowing of the cached order collection. Two
//! stages applied in fixed order: status match first, then free-text
//! search over customer name, customer email and the numeric id.

use crate::models::{Order, OrderStatus};

/// Status narrowing: everything, or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == wanted,
        }
    }

    /// Next choice in the fixed cycle ALL -> PLACED -> ... -> CANCELLED -> ALL.
    pub fn cycle(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(OrderStatus::Placed),
            StatusFilter::Only(OrderStatus::Placed) => StatusFilter::Only(OrderStatus::Processing),
            StatusFilter::Only(OrderStatus::Processing) => StatusFilter::Only(OrderStatus::Ready),
            StatusFilter::Only(OrderStatus::Ready) => StatusFilter::Only(OrderStatus::Delivered),
            StatusFilter::Only(OrderStatus::Delivered) => {
                StatusFilter::Only(OrderStatus::Cancelled)
            }
            StatusFilter::Only(_) => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Statuses",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

/// Active view filter: status plus free-text search term.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: StatusFilter,
    pub search: String,
}

impl OrderFilter {
    /// Narrow `orders`, preserving input order.
    ///
    /// Status is matched first, then the trimmed search term; a blank
    /// term applies no text filter.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let needle = self.search.trim().to_lowercase();
        orders
            .iter()
            .filter(|order| self.status.matches(order.status))
            .filter(|order| needle.is_empty() || matches_search(order, &needle))
            .collect()
    }
}

/// Case-insensitive name/email substring match, or exact id match.
/// An absent field skips its predicate without excluding the order.
fn matches_search(order: &Order, needle: &str) -> bool {
    let field_contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(needle))
    };
    field_contains(&order.customer_name)
        || field_contains(&order.customer_email)
        || order.id.to_string() == needle
}
