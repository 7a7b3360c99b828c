use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    handlers::PrettyJson,
    models::{NewProduct, Product},
    AppState,
};

// ── List ─────────────────────────────────────────────────────────────────────

pub async fn list_products(
    State(state): State<AppState>,
) -> (StatusCode, PrettyJson<Vec<Product>>) {
    let products = state.catalog.read().await.list();
    info!(count = products.len(), "Listed products");
    (StatusCode::OK, PrettyJson(products))
}

// ── Create ───────────────────────────────────────────────────────────────────

/// The body extractor is taken as a `Result` so a malformed payload becomes an
/// explicit 400 with a message body instead of the framework default.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> AppResult<(StatusCode, PrettyJson<Product>)> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    // Single critical section for append + id increment.
    let product = state.catalog.write().await.add(payload);

    info!(id = product.id, name = %product.name, "Created product");

    Ok((StatusCode::CREATED, PrettyJson(product)))
}

// ── Get by ID ────────────────────────────────────────────────────────────────

/// The raw path segment goes straight to the store, which treats a
/// non-numeric segment the same as an unknown id. Exactly one response is
/// produced per request: success returns here, failure renders through
/// `AppError`.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, PrettyJson<Product>)> {
    let product = state.catalog.read().await.get(&id)?;

    info!(id = product.id, "Fetched product");

    Ok((StatusCode::OK, PrettyJson(product)))
}
