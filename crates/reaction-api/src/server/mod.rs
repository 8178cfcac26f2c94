//! Server setup and initialization
//!
//! Builds the storage backend, the service context and the router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use reaction_common::{AppConfig, AppError, JwtService, StorageBackend};
use reaction_core::{
    AtomicRevisionSource, ReactionRepository, SubscriptionRepository, TopicRepository,
};
use reaction_db::{
    create_pool, run_migrations, MemoryStore, PgReactionRepository,
    PgSubscriptionRepository, PgTopicRepository, PoolConfig,
};
use reaction_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_api_middleware, apply_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Repositories of one storage backend
struct Storage {
    reactions: Arc<dyn ReactionRepository>,
    topics: Arc<dyn TopicRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl Storage {
    fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            reactions: store.clone(),
            topics: store.clone(),
            subscriptions: store,
        }
    }

    async fn postgres(config: &AppConfig) -> Result<Self, AppError> {
        let db_config = config.database.as_ref().ok_or_else(|| {
            AppError::Config("DATABASE_URL is required for the postgres backend".to_string())
        })?;

        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&PoolConfig::from(db_config))
            .await
            .map_err(|e| AppError::Unavailable(format!("PostgreSQL: {e}")))?;
        info!("PostgreSQL connection established");

        if db_config.run_migrations {
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Config(format!("Migration failed: {e}")))?;
            info!("Database schema is up to date");
        }

        Ok(Self {
            reactions: Arc::new(PgReactionRepository::new(pool.clone())),
            topics: Arc::new(PgTopicRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool)),
        })
    }
}

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` when the middleware settings are unusable
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_api_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;
    let router = apply_middleware(api.merge(health_routes()));
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let storage = match config.store.backend {
        StorageBackend::Postgres => Storage::postgres(&config).await?,
        StorageBackend::Memory => {
            info!("Using in-memory reaction store");
            Storage::memory()
        }
    };

    // Continue the revision sequence where the store left off
    let latest = storage
        .reactions
        .latest_revision()
        .await
        .map_err(|e| AppError::Unavailable(e.to_string()))?;
    info!(latest_revision = %latest, "Revision source seeded");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .reaction_repo(storage.reactions)
        .topic_repo(storage.topics)
        .subscription_repo(storage.subscriptions)
        .revision_source(Arc::new(AtomicRevisionSource::starting_after(latest)))
        .jwt_service(jwt_service)
        .sync_config(config.sync)
        .operation_timeout(config.store.operation_timeout())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
