//! Application state - shared across all handlers.

use std::sync::Arc;

use folio_core::PostService;
use folio_core::ports::{PostRepository, UserRepository};
use folio_infra::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

use crate::config::{AppConfig, PaginationConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: Arc<dyn UserRepository>,
    pub pagination: PaginationConfig,
    /// Name of the active storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    fn build(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        pagination: PaginationConfig,
        storage: &'static str,
    ) -> Self {
        Self {
            posts: PostService::new(posts, users.clone()),
            users,
            pagination,
            storage,
        }
    }

    /// State backed by in-memory stores.
    pub fn in_memory(pagination: PaginationConfig) -> Self {
        Self::build(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            pagination,
            "memory",
        )
    }

    /// Build the application state from configuration.
    ///
    /// A configured database that cannot be reached is a startup error.
    pub async fn from_config(config: &AppConfig) -> std::io::Result<Self> {
        match &config.database {
            Some(db_config) => Self::connect(db_config, config.pagination).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Ok(Self::in_memory(config.pagination))
            }
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect(
        db_config: &DatabaseConfig,
        pagination: PaginationConfig,
    ) -> std::io::Result<Self> {
        use folio_infra::{PostgresPostRepository, PostgresUserRepository};

        let conn = folio_infra::database::connect(db_config)
            .await
            .map_err(std::io::Error::other)?;

        tracing::info!("Application state initialized (postgres)");
        Ok(Self::build(
            Arc::new(PostgresPostRepository::new(conn.clone())),
            Arc::new(PostgresUserRepository::new(conn)),
            pagination,
            "postgres",
        ))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(
        _db_config: &DatabaseConfig,
        pagination: PaginationConfig,
    ) -> std::io::Result<Self> {
        tracing::warn!(
            "DATABASE_URL is set but the postgres feature is disabled. Using in-memory mode."
        );
        Ok(Self::in_memory(pagination))
    }
}
