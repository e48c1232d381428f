//! In-memory user storage.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use meeplelog_auth::{AuthError, AuthResult, User, UserStorage, UserUpdate};

/// HashMap-backed [`UserStorage`], keyed by user name.
///
/// Enforces the same uniqueness constraints the relational schema does:
/// names and emails are unique across active AND soft-deleted rows.
#[derive(Default)]
pub struct InMemoryUserStorage {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStorage for InMemoryUserStorage {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.name) {
            return Err(AuthError::storage(format!(
                "unique violation: user name [{}]",
                user.name
            )));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::storage(format!(
                "unique violation: email [{}]",
                user.email
            )));
        }
        users.insert(user.name.clone(), user.clone());
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
        let mut active: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| !u.is_deleted)
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn list_deleted(&self) -> AuthResult<Vec<User>> {
        let mut deleted: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.is_deleted)
            .cloned()
            .collect();
        deleted.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(deleted)
    }

    async fn update_fields(&self, name: &str, update: &UserUpdate) -> AuthResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(name)
            .ok_or_else(|| AuthError::storage(format!("user [{name}] missing on update")))?;

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
            .ok_or_else(|| AuthError::storage(format!("user [{name}] missing on update")))?;
        user.password_hash = password_hash.to_string();
        user.updated_at = OffsetDateTime::now_utc();
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
            .ok_or_else(|| AuthError::storage(format!("user [{name}] missing on update")))?;
        user.is_deleted = deleted;
        user.deleted_at = deleted_at;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: OffsetDateTime) -> AuthResult<u64> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| !matches!(u.deleted_at, Some(at) if at < cutoff));
        Ok((before - users.len()) as u64)
    }
}
