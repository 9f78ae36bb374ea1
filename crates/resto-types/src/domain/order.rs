use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::principal::Principal;
use crate::domain::status::PENDING;

/// Sequential per-process identifier allocated by the repository. Storage is
/// ephemeral, so no cross-restart uniqueness is claimed.
pub type OrderId = u64;

/// A product reference plus quantity. Carried through as supplied; the core
/// does not validate references against the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: String,
    pub qty: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub payment_method: String,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub owner_username: String,
}

/// An order before the repository has allocated its id. `status` and
/// `created_at` are fixed at construction; callers never choose them.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub payment_method: String,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
    pub owner_username: String,
}

impl NewOrder {
    pub fn for_owner(
        principal: &Principal,
        payment_method: String,
        items: Vec<OrderItem>,
        delivery_address: String,
    ) -> Self {
        Self {
            payment_method,
            status: PENDING.to_string(),
            items,
            delivery_address,
            created_at: Utc::now(),
            owner_username: principal.username.clone(),
        }
    }

    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            payment_method: self.payment_method,
            status: self.status,
            items: self.items,
            delivery_address: self.delivery_address,
            created_at: self.created_at,
            owner_username: self.owner_username,
        }
    }
}

impl Order {
    /// Content edits are only legal in this state.
    pub fn is_pending(&self) -> bool {
        self.status == PENDING
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner_username == username
    }
}
