use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use resto_types::domain::order::{NewOrder, Order, OrderId};
use resto_types::ports::order_repository::{OrderRepository, RepoError};

/// Process-local order store. Ids come from a sequential counter, so sorting
/// by id reproduces creation order.
#[derive(Clone)]
pub struct InMemoryOrders {
    map: Arc<DashMap<OrderId, Order>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryOrders {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let order = order.into_order(id);
        self.map.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        Ok(self.map.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let mut orders: Vec<Order> = self.map.iter().map(|kv| kv.value().clone()).collect();
        orders.sort_unstable_by_key(|o| o.id);
        Ok(orders)
    }

    async fn replace(&self, id: OrderId, order: Order) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.map.get_mut(&id) {
            *v = order;
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: OrderId) -> Result<bool, RepoError> {
        Ok(self.map.remove(&id).is_some())
    }
}
