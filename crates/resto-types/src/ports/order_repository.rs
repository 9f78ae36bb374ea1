use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order, OrderId};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("store error: {0}")]
    StoreError(String),
}

/// Keyed order storage. `create` allocates the next sequential id; `list`
/// returns orders in creation order.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError>;
    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError>;
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
    async fn replace(&self, id: OrderId, order: Order) -> Result<Option<Order>, RepoError>;
    async fn delete(&self, id: OrderId) -> Result<bool, RepoError>;
}
