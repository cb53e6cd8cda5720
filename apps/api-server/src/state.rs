//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostLifecycleManager;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostLifecycleManager,
}

impl AppState {
    pub fn new(store: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostLifecycleManager::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryPostRepository::new()))
    }

    /// Pick the post store from configuration, falling back to memory when the
    /// database is unset or unreachable.
    pub async fn from_config(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let store: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => match quill_infra::database::connect(db_config).await {
                Ok(conn) => Arc::new(quill_infra::PostgresPostRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory store.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Posts will be kept in memory.");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let store: Arc<dyn PostRepository> = {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");
        Self::new(store)
    }
}
