use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A stored user account. Profiles back both authentication (username plus
/// password check in the session layer) and the delivery-address default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub is_admin: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    #[error("username already taken: {0}")]
    UsernameTaken(String),
}

#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    async fn find(&self, username: &str) -> Option<UserProfile>;

    /// The stored delivery address for a user, used when an order omits one.
    async fn address_of(&self, username: &str) -> Option<String>;

    async fn insert(&self, profile: UserProfile) -> Result<(), DirectoryError>;
}

/// Existence checks for reference data orders point at. The core never
/// rejects on a miss; adapters may answer `true` for everything.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    async fn has_product(&self, id: &str) -> bool;
    async fn has_payment_method(&self, id: &str) -> bool;
}
