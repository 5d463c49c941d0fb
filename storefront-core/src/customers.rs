use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use storefront_shared::Customer;

use crate::repository::{CustomerRepository, RepositoryError, RepositoryResult, UniqueViolation};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("This email is already assigned to a customer")]
    EmailInUse,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Registers customers, one per email address.
pub struct CreateCustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CreateCustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn execute(&self, request: CreateCustomerRequest) -> Result<Customer, CustomerError> {
        if self.customers.find_by_email(&request.email).await?.is_some() {
            warn!(name = %request.name, "Customer email already registered");
            return Err(CustomerError::EmailInUse);
        }

        let customer = self
            .customers
            .create(&Customer::new(request.name, request.email))
            .await
            .map_err(|e| {
                if e.is::<UniqueViolation>() {
                    warn!("Customer email registered concurrently");
                    CustomerError::EmailInUse
                } else {
                    e.into()
                }
            })?;

        info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }
}

/// In-memory customer directory, used by the `memory` storage backend and tests.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<HashMap<Uuid, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self {
            customers: RwLock::new(customers.into_iter().map(|c| (c.id, c)).collect()),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| c.email.expose() == email)
            .cloned())
    }

    async fn create(&self, customer: &Customer) -> RepositoryResult<Customer> {
        self.customers.write().await.insert(customer.id, customer.clone());
        Ok(customer.clone())
    }
}
