//! Shared fixtures for the crate's unit tests.

use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::AuthResult;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::storage::user::{User, UserStorage, UserUpdate};

/// Mock user storage backed by a HashMap.
pub(crate) struct MockUserStorage {
    users: RwLock<HashMap<String, User>>,
}

impl MockUserStorage {
    pub(crate) fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn add(&self, user: User) {
        self.users.write().await.insert(user.name.clone(), user);
    }
}

#[async_trait::async_trait]
impl UserStorage for MockUserStorage {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.add(user.clone()).await;
        Ok(())
    }

    async fn find_by_name(&self, name: &str, include_deleted: bool) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .get(name)
            .filter(|u| include_deleted || !u.is_deleted)
            .cloned())
    }

    async fn find_by_email(&self, email: &str, include_deleted: bool) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email && (include_deleted || !u.is_deleted))
            .cloned())
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| !u.is_deleted)
            .cloned()
            .collect())
    }

    async fn list_deleted(&self) -> AuthResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.is_deleted)
            .cloned()
            .collect())
    }

    async fn update_fields(&self, name: &str, update: &UserUpdate) -> AuthResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| AuthError::storage("user missing"))?;
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    async fn update_password(&self, name: &str, password_hash: &str) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| AuthError::storage("user missing"))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn set_deleted(
        &self,
        name: &str,
        deleted: bool,
        deleted_at: Option<OffsetDateTime>,
    ) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| AuthError::storage("user missing"))?;
        user.is_deleted = deleted;
        user.deleted_at = deleted_at;
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: OffsetDateTime) -> AuthResult<u64> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| !matches!(u.deleted_at, Some(at) if at < cutoff));
        Ok((before - users.len()) as u64)
    }
}

/// AuthConfig with a fixed test secret.
pub(crate) fn test_config() -> AuthConfig {
    AuthConfig {
        secret_key: "unit-test-secret".to_string(),
        ..AuthConfig::default()
    }
}
