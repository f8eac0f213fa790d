//! Order Model

use serde::{Deserialize, Serialize};

/// Fulfillment lifecycle status.
///
/// The store tags statuses with prefixed SCREAMING_SNAKE_CASE strings.
/// Anything outside the known set decodes as [`OrderStatus::Unknown`]
/// instead of failing the whole payload; an unknown status offers no
/// transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "ORDER_PLACED")]
    Placed,
    #[serde(rename = "ORDER_PROCESSING")]
    Processing,
    #[serde(rename = "ORDER_READY")]
    Ready,
    #[serde(rename = "ORDER_DELIVERED")]
    Delivered,
    #[serde(rename = "ORDER_CANCELLED")]
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Statuses known to the store, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Placed,
        OrderStatus::Processing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The single forward-progress transition, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Unknown => None,
        }
    }

    /// Whether the order may still move sideways into CANCELLED.
    pub fn can_cancel(self) -> bool {
        matches!(
            self,
            OrderStatus::Placed | OrderStatus::Processing | OrderStatus::Ready
        )
    }

    /// Terminal orders are immutable in the dashboard.
    pub fn can_edit(self) -> bool {
        !self.is_terminal()
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Wire tag, used in URL paths and stats lookups.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "ORDER_PLACED",
            OrderStatus::Processing => "ORDER_PROCESSING",
            OrderStatus::Ready => "ORDER_READY",
            OrderStatus::Delivered => "ORDER_DELIVERED",
            OrderStatus::Cancelled => "ORDER_CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Placed => "Order Placed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Ready => "Ready for Delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unknown => "Unknown",
        }
    }

    /// Presentation token for the status chip.
    pub fn color(self) -> StatusColor {
        match self {
            OrderStatus::Placed => StatusColor::Primary,
            OrderStatus::Processing => StatusColor::Warning,
            OrderStatus::Ready => StatusColor::Info,
            OrderStatus::Delivered => StatusColor::Success,
            OrderStatus::Cancelled => StatusColor::Error,
            OrderStatus::Unknown => StatusColor::Default,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation tokens for status chips.
///
/// The rendering shell maps these to its own palette; unknown statuses
/// fall back to [`StatusColor::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusColor {
    Primary,
    Warning,
    Info,
    Success,
    Error,
    #[default]
    Default,
}

/// Order entity (cached copy of a store-owned record).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub status: OrderStatus,
    /// Total in currency units, computed by the store from items.
    #[serde(default)]
    pub total_amount: f64,
    pub delivery_address: Option<String>,
    pub order_notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Order line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<i64>,
    pub product_name: String,
    pub product_description: Option<String>,
    pub quantity: i32,
    /// Unit price in currency units.
    pub price: f64,
    pub category: Option<String>,
}

/// Create/update payload.
///
/// The store assigns `id` and `createdAt` and recomputes the total from
/// the submitted items.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_id: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
    pub items: Vec<OrderItemDraft>,
}

/// Line item within an [`OrderDraft`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    pub quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One page of the paged listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub current_page: i32,
    pub total_items: i64,
    pub total_pages: i32,
}
