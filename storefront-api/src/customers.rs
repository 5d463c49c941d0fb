use axum::{extract::State, routing::post, Json, Router};
use storefront_core::CreateCustomerRequest;
use storefront_shared::Customer;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/customers", post(create_customer))
}

/// POST /customers
async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.create_customer.execute(req).await?;
    Ok(Json(customer))
}
