use std::collections::HashSet;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use uuid::Uuid;
use storefront_order::CreateOrderRequest;
use storefront_shared::Order;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
}

/// POST /orders
/// Place an order for an existing customer
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    validate(&req)?;

    let order = state.orchestrator.create_order(req).await?;
    info!(order_id = %order.id, "Order placed");
    Ok(Json(order))
}

/// GET /orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .find_order
        .execute(order_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError("Order not found".to_string()))?;

    Ok(Json(order))
}

fn validate(req: &CreateOrderRequest) -> Result<(), AppError> {
    if req.products.is_empty() {
        return Err(AppError::ValidationError(
            "At least one product is required.".to_string(),
        ));
    }
    if req.products.iter().any(|item| item.quantity == 0) {
        return Err(AppError::ValidationError(
            "Quantity must be a positive number.".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(req.products.len());
    if let Some(item) = req.products.iter().find(|item| !seen.insert(item.id)) {
        return Err(AppError::ValidationError(format!(
            "Product listed more than once: {}",
            item.id
        )));
    }
    Ok(())
}
