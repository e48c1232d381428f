//! Application state and its construction from configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use meeplelog_auth::{
    AuthState, RecoveryService, SessionStore, TokenCodec, TokenService, UserStorage,
};
use meeplelog_db_memory::{
    InMemoryGameLogStorage, InMemoryGameStorage, InMemoryLikeStorage, InMemoryUserStorage,
};
use meeplelog_db_postgres::{
    PostgresGameLogStorage, PostgresGameStorage, PostgresLikeStorage, PostgresUserStorage,
    create_pool,
};
use meeplelog_notifications::{LogMailer, Mailer, SmtpConfig, SmtpMailer};
use meeplelog_storage::{GameLogStorage, GameStorage, LikeStorage};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub tokens: Arc<TokenService>,
    pub recovery: Arc<RecoveryService>,
    pub users: Arc<dyn UserStorage>,
    pub games: Arc<dyn GameStorage>,
    pub game_logs: Arc<dyn GameLogStorage>,
    pub likes: Arc<dyn LikeStorage>,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl AppState {
    /// Assembles state from already-constructed collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: AppConfig,
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserStorage>,
        games: Arc<dyn GameStorage>,
        game_logs: Arc<dyn GameLogStorage>,
        likes: Arc<dyn LikeStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> anyhow::Result<Self> {
        let codec = Arc::new(TokenCodec::new(&config.auth)?);

        let auth = AuthState::new(codec.clone(), store.clone(), users.clone());
        let tokens = Arc::new(TokenService::new(
            codec.clone(),
            store.clone(),
            users.clone(),
            config.auth.clone(),
        ));
        let recovery = Arc::new(RecoveryService::new(
            codec,
            store,
            users.clone(),
            mailer,
            config.auth.clone(),
            config.server.public_base_url.clone(),
        ));

        Ok(Self {
            auth,
            tokens,
            recovery,
            users,
            games,
            game_logs,
            likes,
            config: Arc::new(config),
        })
    }

    /// Fully in-memory state for tests and storage-less development runs.
    pub fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        Self::new(
            config,
            Arc::new(meeplelog_auth::MemorySessionStore::new()),
            Arc::new(InMemoryUserStorage::new()),
            Arc::new(InMemoryGameStorage::new()),
            Arc::new(InMemoryGameLogStorage::new()),
            Arc::new(InMemoryLikeStorage::new()),
            Arc::new(LogMailer),
        )
    }
}

/// Builds state from configuration, choosing backends by the enabled
/// flags: Redis vs in-memory session store, PostgreSQL vs in-memory
/// persistence, SMTP vs log-only mail.
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn SessionStore> = if config.redis.enabled {
        let redis_config = deadpool_redis::Config::from_url(&config.redis.url);
        let mut pool_builder = redis_config
            .builder()
            .map_err(|e| anyhow::anyhow!("redis pool: {e}"))?;
        pool_builder = pool_builder.max_size(config.redis.pool_size);
        let pool = pool_builder
            .runtime(deadpool_redis::Runtime::Tokio1)
            .build()
            .map_err(|e| anyhow::anyhow!("redis pool: {e}"))?;
        info!(url = %config.redis.url, "Using Redis session store");
        Arc::new(meeplelog_auth::RedisSessionStore::new(pool))
    } else {
        info!("Redis disabled; using in-memory session store");
        Arc::new(meeplelog_auth::MemorySessionStore::new())
    };

    let mailer: Arc<dyn Mailer> = if config.email.enabled {
        let smtp = SmtpMailer::new(&SmtpConfig {
            host: config.email.smtp_host.clone(),
            port: config.email.smtp_port,
            username: config.email.smtp_username.clone(),
            password: config.email.smtp_password.clone(),
            from: config.email.from.clone(),
        })?;
        info!(host = %config.email.smtp_host, "Using SMTP mailer");
        Arc::new(smtp)
    } else {
        info!("Email disabled; recovery links are logged");
        Arc::new(LogMailer)
    };

    if config.database.enabled {
        let pool = create_pool(&config.database.postgres).await?;
        info!("Using PostgreSQL storage");
        AppState::new(
            config,
            store,
            Arc::new(PostgresUserStorage::new(pool.clone())),
            Arc::new(PostgresGameStorage::new(pool.clone())),
            Arc::new(PostgresGameLogStorage::new(pool.clone())),
            Arc::new(PostgresLikeStorage::new(pool)),
            mailer,
        )
    } else {
        info!("Database disabled; using in-memory storage");
        AppState::new(
            config,
            store,
            Arc::new(InMemoryUserStorage::new()),
            Arc::new(InMemoryGameStorage::new()),
            Arc::new(InMemoryGameLogStorage::new()),
            Arc::new(InMemoryLikeStorage::new()),
            mailer,
        )
    }
}
