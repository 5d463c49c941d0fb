use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use storefront_core::repository::{ProductRepository, RepositoryError, RepositoryResult};
use storefront_shared::{Product, ProductQuantityUpdate};

use crate::database::insert_error;

pub struct StoreProductRepository {
    pool: PgPool,
}

impl StoreProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            name: row.name,
            price: row.price,
            quantity: u32::try_from(row.quantity)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_PRODUCT: &str =
    "SELECT id, name, price, quantity, created_at, updated_at FROM products";

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn find_all_by_id(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE id = ANY($1)", SELECT_PRODUCT))
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update_quantity(&self, updates: &[ProductQuantityUpdate]) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        for update in updates {
            let result = sqlx::query(
                "UPDATE products SET quantity = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(i32::try_from(update.quantity)?)
            .bind(update.id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("Product not found: {}", update.id).into());
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} WHERE name = $1", SELECT_PRODUCT))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn create(&self, product: &Product) -> RepositoryResult<Product> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(i32::try_from(product.quantity)?)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(product.clone())
    }
}
