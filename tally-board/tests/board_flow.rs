//! Controller flows against an in-memory order store.
//!
//! The double implements the same `OrderStore` seam the REST client
//! does, with switchable failures and call counters, so reconciliation
//! and delete-gating behavior can be observed directly.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{Order, OrderDraft, OrderStats, OrderStatus, StatusFilter};
use tally_board::{NoticeLevel, OrderBoard};
use tally_client::{ClientError, ClientResult, OrderStore};

#[derive(Debug, Default)]
struct StoreState {
    orders: Mutex<Vec<Order>>,
    fail_orders: AtomicBool,
    fail_stats: AtomicBool,
    fail_delete: AtomicBool,
    fetch_all_calls: AtomicUsize,
    update_calls: AtomicUsize,
    update_status_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
struct MemoryStore(Arc<StoreState>);

impl MemoryStore {
    fn seeded(orders: Vec<Order>) -> Self {
        let store = Self::default();
        *store.0.orders.lock().unwrap() = orders;
        store
    }

    fn snapshot(&self) -> Vec<Order> {
        self.0.orders.lock().unwrap().clone()
    }

    fn push(&self, order: Order) {
        self.0.orders.lock().unwrap().push(order);
    }
}

fn offline() -> ClientError {
    ClientError::Internal("store offline".to_string())
}

fn not_found(id: i64) -> ClientError {
    ClientError::NotFound(format!("Order not found with id: {}", id))
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn fetch_all(&self) -> ClientResult<Vec<Order>> {
        self.0.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_orders.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(self.snapshot())
    }

    async fn fetch_by_id(&self, id: i64) -> ClientResult<Order> {
        self.snapshot()
            .into_iter()
            .find(|order| order.id == id)
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: &OrderDraft) -> ClientResult<Order> {
        let mut orders = self.0.orders.lock().unwrap();
        let id = orders.iter().map(|order| order.id).max().unwrap_or(0) + 1;
        let order = Order {
            id,
            customer_id: draft.customer_id.clone(),
            customer_name: Some(draft.customer_name.clone()),
            customer_email: draft.customer_email.clone(),
            customer_phone: draft.customer_phone.clone(),
            status: OrderStatus::Placed,
            total_amount: draft
                .items
                .iter()
                .map(|item| item.price * item.quantity as f64)
                .sum(),
            delivery_address: draft.delivery_address.clone(),
            order_notes: draft.order_notes.clone(),
            items: Vec::new(),
            created_at: Some("2025-11-02T09:00:00".to_string()),
            updated_at: Some("2025-11-02T09:00:00".to_string()),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn update(&self, id: i64, draft: &OrderDraft) -> ClientResult<Order> {
        self.0.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut orders = self.0.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| not_found(id))?;
        order.customer_name = Some(draft.customer_name.clone());
        order.customer_email = draft.customer_email.clone();
        order.delivery_address = draft.delivery_address.clone();
        order.updated_at = Some("2025-11-02T10:15:00".to_string());
        Ok(order.clone())
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order> {
        self.0.update_status_calls.fetch_add(1, Ordering::SeqCst);
        let mut orders = self.0.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| not_found(id))?;
        order.status = status;
        // Store-computed field the client cannot know without re-fetching.
        order.updated_at = Some("2025-11-02T10:15:00".to_string());
        Ok(order.clone())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.0.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_delete.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let mut orders = self.0.orders.lock().unwrap();
        let before = orders.len();
        orders.retain(|order| order.id != id);
        if orders.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn fetch_stats(&self) -> ClientResult<OrderStats> {
        if self.0.fail_stats.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let orders = self.snapshot();
        let mut stats = OrderStats {
            total_orders: orders.len() as i64,
            ..Default::default()
        };
        for status in OrderStatus::ALL {
            let count = orders
                .iter()
                .filter(|order| order.status == status)
                .count() as i64;
            stats
                .status_counts
                .insert(status.as_str().to_string(), count);
        }
        Ok(stats)
    }
}

fn order(id: i64, status: OrderStatus, name: &str) -> Order {
    Order {
        id,
        customer_id: format!("CUST-{}", id),
        customer_name: Some(name.to_string()),
        customer_email: Some(format!("{}@example.com", name.to_lowercase())),
        customer_phone: None,
        status,
        total_amount: 25.0,
        delivery_address: None,
        order_notes: None,
        items: Vec::new(),
        created_at: Some("2025-11-01T08:00:00".to_string()),
        updated_at: None,
    }
}

fn error_count<S: OrderStore>(board: &OrderBoard<S>) -> usize {
    board
        .notices()
        .iter()
        .filter(|notice| notice.level == NoticeLevel::Error)
        .count()
}

#[tokio::test]
async fn test_initial_refresh_populates_collection_and_stats() {
    let store = MemoryStore::seeded(vec![
        order(1, OrderStatus::Placed, "Bob"),
        order(2, OrderStatus::Delivered, "Ann"),
    ]);
    let mut board = OrderBoard::new(store.clone());
    assert!(board.is_loading());

    board.refresh().await;

    assert!(!board.is_loading());
    assert_eq!(board.orders().len(), 2);
    let stats = board.stats().expect("stats loaded");
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.count_for(OrderStatus::Placed), 1);
}

#[tokio::test]
async fn test_status_update_reconciles_instead_of_patching() {
    let store = MemoryStore::seeded(vec![order(1, OrderStatus::Placed, "Bob")]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    board.update_status(1, OrderStatus::Processing).await;

    // The collection equals a fresh fetch-all, including the
    // store-computed updatedAt a local patch could not have produced.
    assert_eq!(board.orders(), store.snapshot().as_slice());
    assert_eq!(board.orders()[0].status, OrderStatus::Processing);
    assert_eq!(
        board.orders()[0].updated_at.as_deref(),
        Some("2025-11-02T10:15:00")
    );
    assert_eq!(store.0.fetch_all_calls.load(Ordering::SeqCst), 2);
    // Stats were re-fetched alongside the collection.
    assert_eq!(
        board.stats().unwrap().count_for(OrderStatus::Processing),
        1
    );
}

#[tokio::test]
async fn test_delete_trigger_alone_issues_no_store_call() {
    let store = MemoryStore::seeded(vec![order(1, OrderStatus::Placed, "Bob")]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    board.request_delete(1);
    assert_eq!(board.pending_delete(), Some(1));
    assert_eq!(store.0.delete_calls.load(Ordering::SeqCst), 0);

    board.dismiss_delete();
    assert_eq!(board.pending_delete(), None);
    assert_eq!(store.0.delete_calls.load(Ordering::SeqCst), 0);
    assert_eq!(board.orders().len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_reconciles_and_clears_gate() {
    let store = MemoryStore::seeded(vec![
        order(1, OrderStatus::Placed, "Bob"),
        order(2, OrderStatus::Ready, "Ann"),
    ]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    board.request_delete(1);
    board.confirm_delete().await;

    assert_eq!(store.0.delete_calls.load(Ordering::SeqCst), 1);
    assert_eq!(board.pending_delete(), None);
    assert_eq!(board.orders().len(), 1);
    assert_eq!(board.orders()[0].id, 2);
    assert_eq!(board.stats().unwrap().total_orders, 1);
}

#[tokio::test]
async fn test_failed_delete_clears_gate_and_keeps_collection() {
    let store = MemoryStore::seeded(vec![order(1, OrderStatus::Placed, "Bob")]);
    store.0.fail_delete.store(true, Ordering::SeqCst);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    board.request_delete(1);
    board.confirm_delete().await;

    assert_eq!(store.0.delete_calls.load(Ordering::SeqCst), 1);
    assert_eq!(board.pending_delete(), None);
    assert_eq!(board.orders().len(), 1);
    assert_eq!(
        board.notices().latest().map(|notice| notice.level),
        Some(NoticeLevel::Error)
    );
}

#[tokio::test]
async fn test_stats_failure_does_not_block_collection() {
    let store = MemoryStore::seeded(vec![
        order(1, OrderStatus::Placed, "Bob"),
        order(2, OrderStatus::Ready, "Ann"),
    ]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;
    assert_eq!(board.stats().unwrap().total_orders, 2);

    store.push(order(3, OrderStatus::Placed, "Carol"));
    store.0.fail_stats.store(true, Ordering::SeqCst);
    let errors_before = error_count(&board);

    board.refresh().await;

    // Collection updated; stats panel kept its previous snapshot and
    // exactly one error notice was raised, for stats only.
    assert_eq!(board.orders().len(), 3);
    assert_eq!(board.stats().unwrap().total_orders, 2);
    assert_eq!(error_count(&board) - errors_before, 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_last_known_good() {
    let store = MemoryStore::seeded(vec![order(1, OrderStatus::Placed, "Bob")]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    store.push(order(9, OrderStatus::Placed, "Zed"));
    store.0.fail_orders.store(true, Ordering::SeqCst);
    board.refresh().await;

    assert!(!board.is_loading());
    assert_eq!(board.orders().len(), 1);
    assert_eq!(
        board.notices().latest().map(|notice| notice.level),
        Some(NoticeLevel::Error)
    );
}

#[tokio::test]
async fn test_advance_and_cancel_respect_lifecycle() {
    let store = MemoryStore::seeded(vec![
        order(5, OrderStatus::Ready, "Dan"),
        order(6, OrderStatus::Cancelled, "Eve"),
    ]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    // Terminal order: neither advance nor cancel reaches the store.
    board.advance_status(6).await;
    board.cancel_order(6).await;
    assert_eq!(store.0.update_status_calls.load(Ordering::SeqCst), 0);

    // READY advances straight to DELIVERED.
    board.advance_status(5).await;
    assert_eq!(store.0.update_status_calls.load(Ordering::SeqCst), 1);
    let delivered = board
        .orders()
        .iter()
        .find(|order| order.id == 5)
        .expect("order 5 present");
    assert_eq!(delivered.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn test_visible_follows_filter_state() {
    let store = MemoryStore::seeded(vec![
        order(1, OrderStatus::Placed, "Bob"),
        order(2, OrderStatus::Delivered, "Ann"),
    ]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    board.set_search("bob");
    let visible: Vec<i64> = board.visible().iter().map(|order| order.id).collect();
    assert_eq!(visible, vec![1]);

    board.set_search("");
    board.set_status_filter(StatusFilter::Only(OrderStatus::Delivered));
    let visible: Vec<i64> = board.visible().iter().map(|order| order.id).collect();
    assert_eq!(visible, vec![2]);
}

#[tokio::test]
async fn test_terminal_orders_refuse_edits() {
    let store = MemoryStore::seeded(vec![order(6, OrderStatus::Cancelled, "Eve")]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    let draft = OrderDraft {
        customer_id: "CUST-6".to_string(),
        customer_name: "Evelyn".to_string(),
        ..Default::default()
    };
    board.update_order(6, draft).await;

    assert_eq!(store.0.update_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        board.orders()[0].customer_name.as_deref(),
        Some("Eve")
    );
}

#[tokio::test]
async fn test_create_order_reconciles_collection() {
    let store = MemoryStore::seeded(vec![order(1, OrderStatus::Placed, "Bob")]);
    let mut board = OrderBoard::new(store.clone());
    board.refresh().await;

    let draft = OrderDraft {
        customer_id: "CUST-2".to_string(),
        customer_name: "Ann".to_string(),
        ..Default::default()
    };
    board.create_order(draft).await;

    assert_eq!(board.orders().len(), 2);
    assert_eq!(board.orders(), store.snapshot().as_slice());
    assert_eq!(board.stats().unwrap().total_orders, 2);
}
