//! Order board controller
//!
//! Owns the dashboard state: the cached order collection, the stats
//! snapshot, the active filter, the loading flag and the delete
//! confirmation gate. All remote work goes through an [`OrderStore`].
//! After every successful mutation the board re-fetches the full
//! collection and stats instead of patching records in place, so the
//! cache can never drift from store-computed fields.

use shared::{Order, OrderDraft, OrderFilter, OrderStats, OrderStatus, StatusFilter};
use tally_client::OrderStore;

use crate::notify::{Notice, NoticeQueue};

/// Two-phase confirmation gate for destructive deletes.
///
/// A delete is only issued from `PendingConfirm`; arming the gate alone
/// never touches the store. There is no timeout: the candidate stays
/// pending until confirmed or dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteGate {
    #[default]
    Idle,
    PendingConfirm(i64),
}

/// Stateful coordinator between the order store and the rendering
/// shell. Each mounted dashboard owns one board; there are no
/// process-wide singletons.
#[derive(Debug)]
pub struct OrderBoard<S> {
    store: S,
    loading: bool,
    orders: Vec<Order>,
    stats: Option<OrderStats>,
    filter: OrderFilter,
    delete_gate: DeleteGate,
    notices: NoticeQueue,
}

impl<S: OrderStore> OrderBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            loading: true,
            orders: Vec::new(),
            stats: None,
            filter: OrderFilter::default(),
            delete_gate: DeleteGate::default(),
            notices: NoticeQueue::default(),
        }
    }

    // ============ Queries ============

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn stats(&self) -> Option<&OrderStats> {
        self.stats.as_ref()
    }

    pub fn filter(&self) -> &OrderFilter {
        &self.filter
    }

    /// The filtered subset currently visible. Synchronous recompute
    /// from the cached collection; no failure mode.
    pub fn visible(&self) -> Vec<&Order> {
        self.filter.apply(&self.orders)
    }

    pub fn pending_delete(&self) -> Option<i64> {
        match self.delete_gate {
            DeleteGate::Idle => None,
            DeleteGate::PendingConfirm(id) => Some(id),
        }
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    fn find(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    // ============ Filtering ============

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.cycle();
    }

    // ============ Load cycle ============

    /// Reconciliation fetch: reload the collection and stats wholesale.
    ///
    /// Both calls run concurrently and fail independently; a stats
    /// failure never blocks the collection update and vice versa. On
    /// failure the previous value is kept.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let (orders, stats) = tokio::join!(self.store.fetch_all(), self.store.fetch_stats());

        match orders {
            Ok(orders) => {
                tracing::debug!("loaded {} orders", orders.len());
                self.orders = orders;
            }
            Err(error) => {
                tracing::warn!("failed to load orders: {}", error);
                self.notices
                    .push(Notice::error(format!("Failed to load orders: {}", error)));
            }
        }

        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(error) => {
                tracing::warn!("failed to load statistics: {}", error);
                self.notices.push(Notice::error(format!(
                    "Failed to load statistics: {}",
                    error
                )));
            }
        }

        self.loading = false;
    }

    // ============ Mutations ============

    pub async fn create_order(&mut self, draft: OrderDraft) {
        match self.store.create(&draft).await {
            Ok(order) => {
                self.notices
                    .push(Notice::success(format!("Order #{} created", order.id)));
                self.refresh().await;
            }
            Err(error) => {
                self.notices
                    .push(Notice::error(format!("Failed to create order: {}", error)));
            }
        }
    }

    /// Replace an order's details. Terminal orders are immutable in
    /// the dashboard; the store is still authoritative.
    pub async fn update_order(&mut self, id: i64, draft: OrderDraft) {
        let editable = self.find(id).is_some_and(|order| order.status.can_edit());
        if !editable {
            self.notices.push(Notice::info(format!(
                "Order #{} can no longer be edited",
                id
            )));
            return;
        }
        match self.store.update(id, &draft).await {
            Ok(_) => {
                self.notices
                    .push(Notice::success(format!("Order #{} updated", id)));
                self.refresh().await;
            }
            Err(error) => {
                self.notices
                    .push(Notice::error(format!("Failed to update order: {}", error)));
            }
        }
    }

    /// Move an order to `status`; reconciles on success.
    pub async fn update_status(&mut self, id: i64, status: OrderStatus) {
        match self.store.update_status(id, status).await {
            Ok(_) => {
                self.notices.push(Notice::success(format!(
                    "Order #{} moved to {}",
                    id,
                    status.label()
                )));
                self.refresh().await;
            }
            Err(error) => {
                self.notices.push(Notice::error(format!(
                    "Failed to update order status: {}",
                    error
                )));
            }
        }
    }

    /// Advance the order along its lifecycle, if it has a next step.
    pub async fn advance_status(&mut self, id: i64) {
        let Some(next) = self.find(id).and_then(|order| order.status.next()) else {
            self.notices
                .push(Notice::info(format!("Order #{} has no next status", id)));
            return;
        };
        self.update_status(id, next).await;
    }

    /// Cancel the order unless it is already terminal.
    pub async fn cancel_order(&mut self, id: i64) {
        let cancellable = self.find(id).is_some_and(|order| order.status.can_cancel());
        if !cancellable {
            self.notices.push(Notice::info(format!(
                "Order #{} can no longer be cancelled",
                id
            )));
            return;
        }
        self.update_status(id, OrderStatus::Cancelled).await;
    }

    // ============ Two-phase delete ============

    /// Arm the delete gate. No store call happens until
    /// [`confirm_delete`](Self::confirm_delete).
    pub fn request_delete(&mut self, id: i64) {
        self.delete_gate = DeleteGate::PendingConfirm(id);
    }

    /// Disarm the gate without deleting.
    pub fn dismiss_delete(&mut self) {
        self.delete_gate = DeleteGate::Idle;
    }

    /// Issue the pending delete. The gate is cleared on success and
    /// failure alike; only the notice differs.
    pub async fn confirm_delete(&mut self) {
        let DeleteGate::PendingConfirm(id) = self.delete_gate else {
            return;
        };
        self.delete_gate = DeleteGate::Idle;

        match self.store.delete(id).await {
            Ok(()) => {
                self.notices
                    .push(Notice::success(format!("Order #{} deleted", id)));
                self.refresh().await;
            }
            Err(error) => {
                self.notices
                    .push(Notice::error(format!("Failed to delete order: {}", error)));
            }
        }
    }
}
