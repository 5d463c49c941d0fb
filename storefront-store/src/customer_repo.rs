use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use storefront_core::repository::{CustomerRepository, RepositoryResult};
use storefront_shared::{Customer, Masked};

use crate::database::insert_error;

pub struct StoreCustomerRepository {
    pool: PgPool,
}

impl StoreCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: Masked(row.email),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(crate) const SELECT_CUSTOMER: &str =
    "SELECT id, name, email, created_at, updated_at FROM customers";

#[async_trait]
impl CustomerRepository for StoreCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{} WHERE id = $1", SELECT_CUSTOMER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{} WHERE email = $1", SELECT_CUSTOMER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Customer::from))
    }

    async fn create(&self, customer: &Customer) -> RepositoryResult<Customer> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(customer.email.expose())
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(customer.clone())
    }
}
