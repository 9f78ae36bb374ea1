use std::sync::Arc;

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use resto_types::domain::principal::Principal;
use resto_types::ports::directory::{DirectoryError, UserDirectory, UserProfile};
use uuid::Uuid;

use crate::errors::AppError;

/// Session tokens handed out by `/login`. Tokens are random UUIDs, never
/// derived from anything client-controlled; looking one up yields the
/// `Principal` every core call receives.
pub struct Sessions {
    users: Arc<dyn UserDirectory>,
    tokens: DashMap<String, Principal>,
}

impl Sessions {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            users,
            tokens: DashMap::new(),
        }
    }

    /// Registration never grants admin; admin accounts are seeded at startup.
    pub async fn signup(&self, profile: UserProfile) -> Result<(), AppError> {
        if profile.username.trim().is_empty() || profile.password.is_empty() {
            return Err(AppError::BadRequest("username and password required".into()));
        }
        let profile = UserProfile {
            is_admin: false,
            ..profile
        };
        self.users.insert(profile).await.map_err(|e| match e {
            DirectoryError::UsernameTaken(u) => AppError::Conflict(format!("username taken: {u}")),
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let profile = self
            .users
            .find(username)
            .await
            .ok_or(AppError::Unauthorized)?;
        if profile.password != password {
            return Err(AppError::Unauthorized);
        }
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(
            token.clone(),
            Principal {
                username: profile.username,
                is_admin: profile.is_admin,
            },
        );
        Ok(token)
    }

    pub fn logout(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let token = bearer_token(headers)?;
        self.tokens
            .remove(token)
            .map(|_| ())
            .ok_or(AppError::Unauthorized)
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AppError> {
        let token = bearer_token(headers)?;
        self.tokens
            .get(token)
            .map(|p| p.clone())
            .ok_or(AppError::Unauthorized)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use resto_repo::users::InMemoryUsers;

    fn sessions() -> Sessions {
        let users = InMemoryUsers::with_profiles([UserProfile {
            username: "alice".into(),
            password: "secret".into(),
            full_name: "Alice".into(),
            email: "alice@example.com".into(),
            address: "10 Rose St".into(),
            phone: "".into(),
            is_admin: false,
        }]);
        Sessions::new(Arc::new(users))
    }

    fn auth_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn login_issues_token_that_authenticates() {
        let sessions = sessions();
        let token = sessions.login("alice", "secret").await.unwrap();
        let principal = sessions.authenticate(&auth_headers(&token)).unwrap();
        assert_eq!(principal, Principal::user("alice"));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_unauthorized() {
        let sessions = sessions();
        assert!(matches!(
            sessions.login("alice", "nope").await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            sessions.login("mallory", "secret").await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn missing_or_stale_token_is_unauthorized() {
        let sessions = sessions();
        assert!(matches!(
            sessions.authenticate(&HeaderMap::new()),
            Err(AppError::Unauthorized)
        ));

        let token = sessions.login("alice", "secret").await.unwrap();
        sessions.logout(&auth_headers(&token)).unwrap();
        assert!(matches!(
            sessions.authenticate(&auth_headers(&token)),
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn signup_strips_admin_and_rejects_duplicates() {
        let sessions = sessions();
        let profile = UserProfile {
            username: "bob".into(),
            password: "pw".into(),
            full_name: "Bob".into(),
            email: "bob@example.com".into(),
            address: "22 Oak Ave".into(),
            phone: "".into(),
            is_admin: true, // ignored
        };
        sessions.signup(profile.clone()).await.unwrap();

        let token = sessions.login("bob", "pw").await.unwrap();
        let principal = sessions.authenticate(&auth_headers(&token)).unwrap();
        assert!(!principal.is_admin);

        assert!(matches!(
            sessions.signup(profile).await,
            Err(AppError::Conflict(_))
        ));
    }
}
