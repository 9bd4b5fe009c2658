//! The serve command: pick a storage backend, build the router, listen.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, StorageKind};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryStore, MongoStore, UserRepository};

/// Run the HTTP server until it exits.
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let repository: Arc<dyn UserRepository> = match config.storage {
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage backend");
            Arc::new(MemoryStore::new())
        }
        StorageKind::MongoDb => {
            let db = Database::connect(&config).await?;
            tracing::info!("MongoDB connected");
            Arc::new(MongoStore::new(&db, &config.users_collection))
        }
    };

    let app_state = AppState::new(repository);
    let app = create_router(app_state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
