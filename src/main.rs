use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod catalog;
mod config;
mod error;
mod handlers;
mod models;

use crate::catalog::CatalogStore;
use crate::config::Config;

/// Shared application state — cheap to clone (all heap behind Arc).
///
/// The catalog sits behind one `RwLock` so concurrent creates serialize their
/// append + id-increment as a unit, while reads proceed in parallel.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogStore>>,
}

impl AppState {
    fn with_seed_data() -> Self {
        Self {
            catalog: Arc::new(RwLock::new(CatalogStore::seeded())),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_service=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let state = AppState::with_seed_data();
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Catalog service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/", get(handlers::heartbeat))

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/products/:id", get(handlers::products::get_product))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
