//! Typed order-store API
//!
//! [`OrderStore`] is the seam the dashboard controller depends on; it
//! carries exactly the operations the board consumes. [`OrderClient`]
//! implements it over the REST endpoints and additionally exposes the
//! read endpoints the dashboard core does not use (paged listing,
//! per-customer and per-status queries, server-side search).
//!
//! Pass-through only: no retries, no caching, no local validation.

use async_trait::async_trait;
use shared::{Order, OrderDraft, OrderPage, OrderStats, OrderStatus};
use urlencoding::encode;

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// Remote order-store operations used by the dashboard.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Full unfiltered collection.
    async fn fetch_all(&self) -> ClientResult<Vec<Order>>;

    /// Single order; `NotFound` when the id does not exist.
    async fn fetch_by_id(&self, id: i64) -> ClientResult<Order>;

    /// Create a new order; the store assigns id and timestamps.
    async fn create(&self, draft: &OrderDraft) -> ClientResult<Order>;

    /// Replace customer details and items of an existing order.
    async fn update(&self, id: i64, draft: &OrderDraft) -> ClientResult<Order>;

    /// Move an order to a new status. The store is authoritative on
    /// whether the transition is legal; the dashboard only offers
    /// transitions as a convenience.
    async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order>;

    /// Delete an order.
    async fn delete(&self, id: i64) -> ClientResult<()>;

    /// Aggregate dashboard statistics.
    async fn fetch_stats(&self) -> ClientResult<OrderStats>;
}

/// REST-backed [`OrderStore`] implementation.
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: HttpClient,
}

impl OrderClient {
    /// Create a new client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Paged listing, sorted server-side.
    pub async fn fetch_page(
        &self,
        page: i32,
        size: i32,
        sort_by: &str,
        sort_dir: &str,
    ) -> ClientResult<OrderPage> {
        let path = format!(
            "orders?page={}&size={}&sortBy={}&sortDir={}",
            page,
            size,
            encode(sort_by),
            encode(sort_dir)
        );
        self.http.get(&path).await
    }

    /// All orders for one customer.
    pub async fn by_customer(&self, customer_id: &str) -> ClientResult<Vec<Order>> {
        self.http
            .get(&format!("orders/customer/{}", encode(customer_id)))
            .await
    }

    /// All orders in one status.
    pub async fn by_status(&self, status: OrderStatus) -> ClientResult<Vec<Order>> {
        self.http
            .get(&format!("orders/status/{}", status.as_str()))
            .await
    }

    /// Server-side customer search (distinct from the dashboard's
    /// client-side filter).
    pub async fn search(&self, term: &str) -> ClientResult<Vec<Order>> {
        self.http
            .get(&format!("orders/search?q={}", encode(term)))
            .await
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    async fn fetch_all(&self) -> ClientResult<Vec<Order>> {
        self.http.get("orders/all").await
    }

    async fn fetch_by_id(&self, id: i64) -> ClientResult<Order> {
        self.http.get(&format!("orders/{}", id)).await
    }

    async fn create(&self, draft: &OrderDraft) -> ClientResult<Order> {
        self.http.post("orders", draft).await
    }

    async fn update(&self, id: i64, draft: &OrderDraft) -> ClientResult<Order> {
        self.http.put(&format!("orders/{}", id), draft).await
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order> {
        self.http
            .put_empty(&format!("orders/{}/status?status={}", id, status.as_str()))
            .await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        // The store answers with a `{"message": ...}` receipt; nothing
        // in it is useful to the caller.
        let _receipt: serde_json::Value = self.http.delete(&format!("orders/{}", id)).await?;
        Ok(())
    }

    async fn fetch_stats(&self) -> ClientResult<OrderStats> {
        self.http.get("orders/stats").await
    }
}
