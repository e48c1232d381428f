//! PostgreSQL user storage.

use async_trait::async_trait;
use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use time::OffsetDateTime;

use meeplelog_auth::{AuthError, AuthResult, User, UserStorage, UserUpdate};

use crate::error::{is_unique_violation, to_auth_error};

/// Database tuple for a user row.
type UserTuple = (
    String,
    String,
    String,
    bool,
    bool,
    Option<OffsetDateTime>,
    OffsetDateTime,
    OffsetDateTime,
);

const USER_COLUMNS: &str =
    "name, email, password_hash, is_admin, is_deleted, deleted_at, created_at, updated_at";

fn from_tuple(row: UserTuple) -> User {
    User {
        name: row.0,
        email: row.1,
        password_hash: row.2,
        is_admin: row.3,
        is_deleted: row.4,
        deleted_at: row.5,
        created_at: row.6,
        updated_at: row.7,
    }
}

/// [`UserStorage`] backed by the `users` table.
pub struct PostgresUserStorage {
    pool: PgPool,
}

impl PostgresUserStorage {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStorage for PostgresUserStorage {
    async fn create(&self, user: &User) -> AuthResult<()> {
        query(
            r#"
            INSERT INTO users
                (name, email, password_hash, is_admin, is_deleted, deleted_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.is_deleted)
        .bind(user.deleted_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::storage(format!("unique violation: user [{}]", user.name))
            } else {
                to_auth_error(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str, include_deleted: bool) -> AuthResult<Option<User>> {
        let row: Option<UserTuple> = query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE name = $1 AND (is_deleted = FALSE OR $2)"
        ))
        .bind(name)
        .bind(include_deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(to_auth_error)?;

        Ok(row.map(from_tuple))
    }

    async fn find_by_email(&self, email: &str, include_deleted: bool) -> AuthResult<Option<User>> {
        let row: Option<UserTuple> = query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND (is_deleted = FALSE OR $2)"
        ))
        .bind(email)
        .bind(include_deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(to_auth_error)?;

        Ok(row.map(from_tuple))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows: Vec<UserTuple> = query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_deleted = FALSE ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(to_auth_error)?;

        Ok(rows.into_iter().map(from_tuple).collect())
    }

    async fn list_deleted(&self) -> AuthResult<Vec<User>> {
        let rows: Vec<UserTuple> = query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_deleted = TRUE ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(to_auth_error)?;

        Ok(rows.into_iter().map(from_tuple).collect())
    }

    async fn update_fields(&self, name: &str, update: &UserUpdate) -> AuthResult<User> {
        let row: Option<UserTuple> = query_as(&format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email), updated_at = now()
            WHERE name = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(&update.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(to_auth_error)?;

        row.map(from_tuple)
            .ok_or_else(|| AuthError::storage(format!("user [{name}] missing on update")))
    }

    async fn update_password(&self, name: &str, password_hash: &str) -> AuthResult<()> {
        let result = query("UPDATE users SET password_hash = $2, updated_at = now() WHERE name = $1")
            .bind(name)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(to_auth_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::storage(format!(
                "user [{name}] missing on password update"
            )));
        }
        Ok(())
    }

    async fn set_deleted(
        &self,
        name: &str,
        deleted: bool,
        deleted_at: Option<OffsetDateTime>,
    ) -> AuthResult<()> {
        let result = query(
            "UPDATE users SET is_deleted = $2, deleted_at = $3, updated_at = now() WHERE name = $1",
        )
        .bind(name)
        .bind(deleted)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(to_auth_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::storage(format!(
                "user [{name}] missing on delete-flag update"
            )));
        }
        Ok(())
    }

    async fn delete_older_than(&self, cutoff: OffsetDateTime) -> AuthResult<u64> {
        let result = query("DELETE FROM users WHERE is_deleted = TRUE AND deleted_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(to_auth_error)?;

        Ok(result.rows_affected())
    }
}
