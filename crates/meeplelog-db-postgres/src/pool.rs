//! Connection pool management for the PostgreSQL backends.

use std::time::Duration;

use sqlx_core::pool::PoolOptions;
use sqlx_postgres::{PgPool, Postgres};
use tracing::{debug, info, instrument};

use meeplelog_storage::StorageError;

use crate::config::PostgresConfig;

/// Type alias for PostgreSQL pool options.
pub type PgPoolOptions = PoolOptions<Postgres>;

/// Creates a new PostgreSQL connection pool from the given configuration.
#[instrument(skip(config), fields(url = %mask_password(&config.url)))]
pub async fn create_pool(config: &PostgresConfig) -> Result<PgPool, StorageError> {
    info!(
        pool_size = config.pool_size,
        min_connections = ?config.min_connections,
        connect_timeout_ms = config.connect_timeout_ms,
        "Creating PostgreSQL connection pool"
    );

    let min_connections = config
        .min_connections
        .unwrap_or(config.pool_size / 4)
        .max(1);

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size)
        .min_connections(min_connections)
        .acquire_timeout(Duration::from_millis(config.connect_timeout_ms))
        .connect(&config.url)
        .await
        .map_err(|e| StorageError::backend(e.to_string()))?;

    debug!("PostgreSQL connection pool created successfully");

    Ok(pool)
}

/// Masks the password portion of a connection URL for logging.
fn mask_password(url: &str) -> String {
    match url.find("://").zip(url.rfind('@')) {
        Some((scheme_end, at)) if at > scheme_end + 3 => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}://{}:***{}",
                    &url[..scheme_end],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_masked() {
        assert_eq!(
            mask_password("postgres://app:secret@db/meeplelog"),
            "postgres://app:***@db/meeplelog"
        );
    }

    #[test]
    fn url_without_credentials_unchanged() {
        assert_eq!(
            mask_password("postgres://localhost/meeplelog"),
            "postgres://localhost/meeplelog"
        );
    }
}
