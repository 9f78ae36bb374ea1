use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use resto_types::ports::directory::{DirectoryError, UserDirectory, UserProfile};

/// Process-local user accounts, keyed by username.
#[derive(Clone)]
pub struct InMemoryUsers {
    map: Arc<DashMap<String, UserProfile>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
        }
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let users = Self::new();
        for p in profiles {
            users.map.insert(p.username.clone(), p);
        }
        users
    }
}

impl Default for InMemoryUsers {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUsers {
    async fn find(&self, username: &str) -> Option<UserProfile> {
        self.map.get(username).map(|r| r.clone())
    }

    async fn address_of(&self, username: &str) -> Option<String> {
        self.map
            .get(username)
            .map(|r| r.address.clone())
            .filter(|a| !a.is_empty())
    }

    async fn insert(&self, profile: UserProfile) -> Result<(), DirectoryError> {
        match self.map.entry(profile.username.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(DirectoryError::UsernameTaken(profile.username))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(profile);
                Ok(())
            }
        }
    }
}
