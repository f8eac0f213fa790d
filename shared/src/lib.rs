//! Shared types for the Tally dashboard
//!
//! Wire-format models for the remote order store plus the pure domain
//! logic (status lifecycle, collection filtering) used by the client
//! and dashboard crates.

pub mod filter;
pub mod models;

// Re-exports
pub use filter::{OrderFilter, StatusFilter};
pub use models::{
    Order, OrderDraft, OrderItem, OrderItemDraft, OrderPage, OrderStats, OrderStatus, StatusColor,
};

/// Default order-store endpoint for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
