pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StorageLocation};
use crate::db::{KeyValueStore, SqliteKvStore};
use crate::error::{ApiError, Result};
use crate::services::{CollectionStore, GameService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    collection: Arc<Mutex<CollectionStore>>,
    session: Arc<Mutex<GameService>>,
}

impl AppState {
    pub fn new(collection: CollectionStore) -> Self {
        Self {
            collection: Arc::new(Mutex::new(collection)),
            session: Arc::new(Mutex::new(GameService::new())),
        }
    }

    pub fn store(&self) -> Result<MutexGuard<'_, CollectionStore>> {
        self.collection
            .lock()
            .map_err(|_| ApiError::Internal("collection lock poisoned".to_string()))
    }

    pub fn game(&self) -> Result<MutexGuard<'_, GameService>> {
        self.session
            .lock()
            .map_err(|_| ApiError::Internal("session lock poisoned".to_string()))
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Set routes
        .route(
            "/api/sets",
            get(routes::sets::list)
                .post(routes::sets::create)
                .delete(routes::sets::reset_all),
        )
        .route("/api/sets/demo", post(routes::sets::seed_demo))
        .route(
            "/api/sets/{id}",
            get(routes::sets::get)
                .patch(routes::sets::update)
                .delete(routes::sets::delete),
        )
        .route("/api/sets/{id}/pairs", post(routes::sets::add_pair))
        .route(
            "/api/sets/{id}/pairs/{index}",
            axum::routing::delete(routes::sets::remove_pair),
        )
        .route("/api/sets/{id}/play", post(routes::sets::play))
        // Active set routes
        .route(
            "/api/active",
            get(routes::active::get)
                .put(routes::active::set)
                .delete(routes::active::clear),
        )
        // Game routes
        .route(
            "/api/game",
            get(routes::game::current).post(routes::game::start),
        )
        .route("/api/game/guess", post(routes::game::guess))
        .route("/api/game/reset", post(routes::game::reset))
        .with_state(state)
}

/// Open the key-value store named by the configuration.
pub fn open_storage(location: &StorageLocation) -> anyhow::Result<Box<dyn KeyValueStore>> {
    let store = match location {
        StorageLocation::Memory => SqliteKvStore::open_in_memory()?,
        StorageLocation::File(path) => {
            // Ensure data directory exists
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            SqliteKvStore::open(path)?
        }
    };
    Ok(Box::new(store))
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Opening storage at {:?}...", config.storage);
    let collection = CollectionStore::new(open_storage(&config.storage)?);

    if config.seed_demo && collection.list().is_empty() {
        match collection.seed_demo() {
            Some(set) => tracing::info!("Seeded demo set {}", set.id),
            None => tracing::warn!("Could not seed demo set"),
        }
    }

    let app = router(AppState::new(collection)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
