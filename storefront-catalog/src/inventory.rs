use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;
use storefront_core::repository::{ProductRepository, RepositoryResult};
use storefront_shared::{Product, ProductQuantityUpdate};

/// In-memory product catalog (backs the `memory` storage mode and tests)
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Current on-hand quantity
    pub async fn quantity_of(&self, product_id: &Uuid) -> Option<u32> {
        self.products.read().await.get(product_id).map(|p| p.quantity)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all_by_id(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut seen = HashSet::new();

        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    async fn update_quantity(&self, updates: &[ProductQuantityUpdate]) -> RepositoryResult<()> {
        let mut products = self.products.write().await;

        // Validate the whole batch before touching anything.
        if let Some(missing) = updates.iter().find(|u| !products.contains_key(&u.id)) {
            return Err(InventoryError::NotFound(missing.id).into());
        }

        for update in updates {
            if let Some(product) = products.get_mut(&update.id) {
                product.quantity = update.quantity;
                product.updated_at = Utc::now();
            }
        }

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn create(&self, product: &Product) -> RepositoryResult<Product> {
        self.products.write().await.insert(product.id, product.clone());
        Ok(product.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),
}
