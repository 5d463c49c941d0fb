use axum::{extract::State, routing::post, Json, Router};
use storefront_catalog::CreateProductRequest;
use storefront_shared::Product;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/products", post(create_product))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<Product>, AppError> {
    let product = state.create_product.execute(req).await?;
    Ok(Json(product))
}
