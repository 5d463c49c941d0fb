use async_trait::async_trait;
use uuid::Uuid;
use storefront_shared::{Customer, NewOrderItem, Order, Product, ProductQuantityUpdate};

/// Failure raised by a storage backend (connectivity, constraint violation, ...).
/// Services propagate it untouched.
pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A write collided with a uniqueness constraint. Stores return it boxed
/// inside [`RepositoryError`] so services can tell it apart from other faults.
#[derive(Debug, thiserror::Error)]
#[error("Unique constraint violated: {0}")]
pub struct UniqueViolation(pub String);

/// Repository trait for customer data access
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;

    async fn create(&self, customer: &Customer) -> RepositoryResult<Customer>;
}

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Batch lookup. Unknown ids are skipped, so the result may be partial or
    /// empty. Order of the result is unspecified.
    async fn find_all_by_id(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Product>>;

    /// Overwrite the on-hand quantity of each listed product.
    async fn update_quantity(&self, updates: &[ProductQuantityUpdate]) -> RepositoryResult<()>;

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;

    async fn create(&self, product: &Product) -> RepositoryResult<Product>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order for `customer`. The store assigns ids and timestamps.
    async fn create(&self, customer: &Customer, items: Vec<NewOrderItem>) -> RepositoryResult<Order>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Order>>;
}
