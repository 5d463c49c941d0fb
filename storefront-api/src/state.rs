use std::sync::Arc;
use tracing::info;
use storefront_catalog::{CreateProductService, InMemoryProductRepository};
use storefront_core::repository::{CustomerRepository, OrderRepository, ProductRepository};
use storefront_core::{CreateCustomerService, InMemoryCustomerRepository};
use storefront_order::{FindOrderService, InMemoryOrderRepository, OrderOrchestrator};
use storefront_store::app_config::{Config, StorageBackend};
use storefront_store::{DbClient, StoreCustomerRepository, StoreOrderRepository, StoreProductRepository};

#[derive(Clone)]
pub struct AppState {
    pub create_customer: Arc<CreateCustomerService>,
    pub create_product: Arc<CreateProductService>,
    pub orchestrator: Arc<OrderOrchestrator>,
    pub find_order: Arc<FindOrderService>,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            create_customer: Arc::new(CreateCustomerService::new(customers.clone())),
            create_product: Arc::new(CreateProductService::new(products.clone())),
            orchestrator: Arc::new(OrderOrchestrator::new(customers, products, orders.clone())),
            find_order: Arc::new(FindOrderService::new(orders)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCustomerRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryOrderRepository::new()),
        )
    }

    /// Build the state for the configured storage backend, connecting to
    /// Postgres when selected.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Postgres => {
                let db_config = config.postgres()?;
                let db = DbClient::new(db_config).await?;
                if db_config.run_migrations {
                    db.migrate().await?;
                }
                info!("Using postgres storage");

                Ok(Self::new(
                    Arc::new(StoreCustomerRepository::new(db.pool.clone())),
                    Arc::new(StoreProductRepository::new(db.pool.clone())),
                    Arc::new(StoreOrderRepository::new(db.pool)),
                ))
            }
        }
    }
}
