use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use storefront_core::repository::{OrderRepository, RepositoryResult};
use storefront_shared::{Customer, NewOrderItem, Order, OrderItem};

use crate::customer_repo::{CustomerRow, SELECT_CUSTOMER};

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    customer_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    price: Decimal,
    quantity: i32,
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn create(&self, customer: &Customer, items: Vec<NewOrderItem>) -> RepositoryResult<Order> {
        let order = Order::new(customer.clone(), items);

        // Order and its line items land together or not at all.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id)
        .bind(customer.id)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO orders_products (id, order_id, product_id, price, quantity, position)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.price)
            .bind(i32::try_from(item.quantity)?)
            .bind(i32::try_from(position)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Order>> {
        let Some(row) = sqlx::query_as::<_, OrderRow>(
            "SELECT customer_id, created_at, updated_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let customer = sqlx::query_as::<_, CustomerRow>(&format!("{} WHERE id = $1", SELECT_CUSTOMER))
            .bind(row.customer_id)
            .fetch_one(&self.pool)
            .await?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_id, price, quantity FROM orders_products WHERE order_id = $1 ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(item_rows.len());
        for item in item_rows {
            items.push(OrderItem {
                id: item.id,
                order_id: item.order_id,
                product_id: item.product_id,
                quantity: u32::try_from(item.quantity)?,
                price: item.price,
            });
        }

        Ok(Some(Order {
            id,
            customer: customer.into(),
            items,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
