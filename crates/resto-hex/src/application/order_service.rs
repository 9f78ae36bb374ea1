use std::sync::Arc;

use crate::errors::AppError;
use resto_types::domain::order::{NewOrder, Order, OrderId, OrderItem};
use resto_types::domain::principal::Principal;
use resto_types::domain::status::StatusSet;
use resto_types::ports::directory::{Catalog, UserDirectory};
use resto_types::ports::order_repository::OrderRepository;

/// Content of a new order. An absent or empty delivery address resolves to
/// the address on file for the creating principal.
pub struct CreateOrder {
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    pub delivery_address: Option<String>,
}

/// Content edit for a pending order. Absent fields fall back the same way
/// create does: payment method and items keep their current value, the
/// delivery address resolves to the owner's address on file.
pub struct UpdateOrder {
    pub payment_method: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub delivery_address: Option<String>,
}

/// Owns the order collection and enforces who may create, view, edit, and
/// transition orders. Owners edit content (while `Pending` only); admins
/// transition status (any time, any recognized target).
pub struct OrderService<R: OrderRepository> {
    repo: R,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn Catalog>,
    statuses: StatusSet,
    allow_delete: bool,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(
        repo: R,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn Catalog>,
        statuses: StatusSet,
    ) -> Self {
        Self {
            repo,
            users,
            catalog,
            statuses,
            allow_delete: false,
        }
    }

    /// Order deletion is an extension point, disabled unless opted into.
    pub fn with_order_deletion(mut self, allowed: bool) -> Self {
        self.allow_delete = allowed;
        self
    }

    pub async fn create_order(
        &self,
        principal: &Principal,
        req: CreateOrder,
    ) -> Result<Order, AppError> {
        self.warn_unknown_references(&req.payment_method, &req.items)
            .await;
        let address = self.resolve_address(principal, req.delivery_address).await;
        let new = NewOrder::for_owner(principal, req.payment_method, req.items, address);
        let order = self
            .repo
            .create(new)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        tracing::info!(order_id = order.id, owner = %order.owner_username, "order created");
        Ok(order)
    }

    /// Admins see every order; everyone else sees only their own. Creation
    /// order is preserved either way.
    pub async fn list_orders(&self, principal: &Principal) -> Result<Vec<Order>, AppError> {
        let mut orders = self
            .repo
            .list()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        if !principal.is_admin {
            orders.retain(|o| o.is_owned_by(&principal.username));
        }
        Ok(orders)
    }

    pub async fn get_order(&self, principal: &Principal, id: OrderId) -> Result<Order, AppError> {
        let order = self.fetch(id).await?;
        if !principal.is_admin && !order.is_owned_by(&principal.username) {
            return Err(AppError::Forbidden("not your order".into()));
        }
        Ok(order)
    }

    pub async fn update_order(
        &self,
        principal: &Principal,
        id: OrderId,
        req: UpdateOrder,
    ) -> Result<Order, AppError> {
        let mut order = self.fetch(id).await?;
        // Ownership before state, so a non-owner cannot probe order state.
        // Admins get no edit override: owners edit, admins transition.
        if !order.is_owned_by(&principal.username) {
            return Err(AppError::Forbidden("only the owner may edit an order".into()));
        }
        if !order.is_pending() {
            return Err(AppError::InvalidState(id));
        }
        if let Some(payment_method) = req.payment_method {
            order.payment_method = payment_method;
        }
        if let Some(items) = req.items {
            order.items = items;
        }
        order.delivery_address = self.resolve_address(principal, req.delivery_address).await;
        self.warn_unknown_references(&order.payment_method, &order.items)
            .await;
        self.store(id, order).await
    }

    /// Admin-only status change. Any recognized status is reachable from any
    /// other; no transition graph exists.
    pub async fn transition_order(
        &self,
        principal: &Principal,
        id: OrderId,
        new_status: String,
    ) -> Result<Order, AppError> {
        if !principal.is_admin {
            return Err(AppError::Forbidden(
                "only administrators change order status".into(),
            ));
        }
        let mut order = self.fetch(id).await?;
        if !self.statuses.contains(&new_status) {
            return Err(AppError::InvalidStatus(new_status));
        }
        tracing::info!(order_id = id, from = %order.status, to = %new_status, "order transition");
        order.status = new_status;
        self.store(id, order).await
    }

    pub async fn delete_order(&self, principal: &Principal, id: OrderId) -> Result<(), AppError> {
        if !self.allow_delete {
            return Err(AppError::Forbidden("order deletion is disabled".into()));
        }
        if !principal.is_admin {
            return Err(AppError::Forbidden(
                "only administrators delete orders".into(),
            ));
        }
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        if deleted {
            tracing::info!(order_id = id, "order deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(id))
        }
    }

    async fn fetch(&self, id: OrderId) -> Result<Order, AppError> {
        match self
            .repo
            .get(id)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(order) => Ok(order),
            None => Err(AppError::NotFound(id)),
        }
    }

    async fn store(&self, id: OrderId, order: Order) -> Result<Order, AppError> {
        match self
            .repo
            .replace(id, order)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        {
            Some(order) => Ok(order),
            None => Err(AppError::NotFound(id)),
        }
    }

    async fn resolve_address(
        &self,
        principal: &Principal,
        supplied: Option<String>,
    ) -> String {
        match supplied {
            Some(address) if !address.trim().is_empty() => address,
            _ => self
                .users
                .address_of(&principal.username)
                .await
                .unwrap_or_default(),
        }
    }

    /// Catalog hook: unknown references are logged, never rejected.
    async fn warn_unknown_references(&self, payment_method: &str, items: &[OrderItem]) {
        if !self.catalog.has_payment_method(payment_method).await {
            tracing::warn!(payment_method, "order references unknown payment method");
        }
        for item in items {
            if !self.catalog.has_product(&item.product).await {
                tracing::warn!(product = %item.product, "order references unknown product");
            }
        }
    }
}
