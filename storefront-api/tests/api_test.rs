use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storefront_api::{app, AppState};
use tower::ServiceExt;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_customer(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/customers",
        Some(json!({ "name": "Ada", "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_product(app: &Router, name: &str, price: u32, quantity: u32) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(json!({ "name": name, "price": price, "quantity": quantity })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app(AppState::in_memory());

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_order_flow() {
    let app = app(AppState::in_memory());
    let customer_id = create_customer(&app, "ada@example.com").await;
    let p1 = create_product(&app, "P1", 10, 5).await;

    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 3 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["customer"]["id"], customer_id.as_str());
    assert_eq!(order["customer"]["email"], "ada@example.com");
    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], p1.as_str());
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["price"], "10");

    let order_id = order["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/orders/{}", order_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);

    // Only 2 left after the first order
    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 3 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Insufficient quantity for product"));
    assert!(message.contains(&p1));
    assert!(message.contains("requested 3, available 2"));
}

#[tokio::test]
async fn test_unknown_customer() {
    let app = app(AppState::in_memory());
    let p1 = create_product(&app, "P1", 10, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": "00000000-0000-0000-0000-000000000001",
            "products": [{ "id": p1, "quantity": 1 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Customer does not exist");
}

#[tokio::test]
async fn test_unknown_products() {
    let app = app(AppState::in_memory());
    let customer_id = create_customer(&app, "ada@example.com").await;
    let p1 = create_product(&app, "P1", 10, 5).await;
    let p9 = "00000000-0000-0000-0000-000000000009";

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": customer_id, "products": [{ "id": p9, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "There are no products with these IDs");

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer_id,
            "products": [{ "id": p1, "quantity": 1 }, { "id": p9, "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], format!("Product not found: {}", p9));
}

#[tokio::test]
async fn test_zero_quantity_rejected() {
    let app = app(AppState::in_memory());
    let customer_id = create_customer(&app, "ada@example.com").await;
    let p1 = create_product(&app, "P1", 10, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 0 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Quantity must be a positive number.");
}

#[tokio::test]
async fn test_repeated_product_rejected_without_selling() {
    let app = app(AppState::in_memory());
    let customer_id = create_customer(&app, "ada@example.com").await;
    let p1 = create_product(&app, "P1", 10, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_id": customer_id,
            "products": [{ "id": p1, "quantity": 3 }, { "id": p1, "quantity": 3 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], format!("Product listed more than once: {}", p1));

    // Stock is untouched: the full 5 can still be ordered
    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 5 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicates_conflict() {
    let app = app(AppState::in_memory());
    create_customer(&app, "ada@example.com").await;
    create_product(&app, "P1", 10, 5).await;

    let (status, body) = send(
        &app,
        "POST",
        "/customers",
        Some(json!({ "name": "Ada again", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This email is already assigned to a customer");

    let (status, _) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "P1", "price": 12, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_price_beyond_cents_rejected() {
    let app = app(AppState::in_memory());

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "name": "Pen", "price": "1.999", "quantity": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid price: 1.999");
}

#[tokio::test]
async fn test_missing_order_is_404() {
    let app = app(AppState::in_memory());

    let (status, body) = send(
        &app,
        "GET",
        "/orders/00000000-0000-0000-0000-000000000042",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}
