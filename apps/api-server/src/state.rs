//! Application state - shared across all handlers.

use std::sync::Arc;

use ideaslab_core::ports::{IdeaRepository, PubSub, TokenService};
use ideaslab_core::services::IdeaAccess;
use ideaslab_infra::auth::JwtTokenService;
use ideaslab_infra::{DatabaseConfig, InMemoryIdeaRepository, InMemoryPubSub};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ideas: Arc<IdeaAccess>,
    pub tokens: Arc<dyn TokenService>,
    pub changes: Arc<dyn PubSub>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repo = build_repository(config.database.as_ref()).await;
        let changes: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::default());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!(backfill = ?config.backfill, "Application state initialized");

        Self::from_parts(repo, config, tokens, changes)
    }

    pub fn from_parts(
        repo: Arc<dyn IdeaRepository>,
        config: &AppConfig,
        tokens: Arc<dyn TokenService>,
        changes: Arc<dyn PubSub>,
    ) -> Self {
        let ideas = IdeaAccess::new(repo, config.backfill).with_notifier(changes.clone());
        Self {
            ideas: Arc::new(ideas),
            tokens,
            changes,
        }
    }
}

#[cfg(feature = "postgres")]
async fn build_repository(db_config: Option<&DatabaseConfig>) -> Arc<dyn IdeaRepository> {
    use ideaslab_infra::{PostgresIdeaRepository, connect};

    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryIdeaRepository::new());
    };

    match connect(config).await {
        Ok(conn) => Arc::new(PostgresIdeaRepository::new(conn)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryIdeaRepository::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_repository(db_config: Option<&DatabaseConfig>) -> Arc<dyn IdeaRepository> {
    if db_config.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repository");
    Arc::new(InMemoryIdeaRepository::new())
}
