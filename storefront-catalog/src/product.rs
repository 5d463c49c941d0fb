use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use storefront_core::repository::{ProductRepository, RepositoryError, UniqueViolation};
use storefront_shared::Product;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Product-related errors
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Prices are stored as `NUMERIC(10, 2)`: at most two decimal places and
/// below 10^8.
const MAX_PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

fn valid_price(price: Decimal) -> bool {
    price >= Decimal::ZERO && price < PRICE_LIMIT && price.normalize().scale() <= MAX_PRICE_SCALE
}

/// Adds products to the catalog. Names are unique.
pub struct CreateProductService {
    products: Arc<dyn ProductRepository>,
}

impl CreateProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, request: CreateProductRequest) -> Result<Product, ProductError> {
        if !valid_price(request.price) {
            return Err(ProductError::InvalidPrice(request.price));
        }

        if self.products.find_by_name(&request.name).await?.is_some() {
            warn!(name = %request.name, "Product name already registered");
            return Err(ProductError::AlreadyExists(request.name));
        }

        let name = request.name.clone();
        let product = self
            .products
            .create(&Product::new(request.name, request.price, request.quantity))
            .await
            .map_err(|e| {
                if e.is::<UniqueViolation>() {
                    warn!(name = %name, "Product name registered concurrently");
                    ProductError::AlreadyExists(name)
                } else {
                    e.into()
                }
            })?;

        info!(product_id = %product.id, price = %product.price, quantity = product.quantity, "Product created");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InMemoryProductRepository;

    fn request(name: &str, price: Decimal, quantity: u32) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_product() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let service = CreateProductService::new(repo.clone());

        let product = service
            .execute(request("Keyboard", Decimal::new(4999, 2), 12))
            .await
            .unwrap();

        assert_eq!(product.price, Decimal::new(4999, 2));
        assert_eq!(product.quantity, 12);
        assert_eq!(repo.find_by_name("Keyboard").await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let service = CreateProductService::new(Arc::new(InMemoryProductRepository::new()));

        service.execute(request("Keyboard", Decimal::from(50), 1)).await.unwrap();
        let result = service.execute(request("Keyboard", Decimal::from(60), 2)).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(name)) if name == "Keyboard"));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let service = CreateProductService::new(Arc::new(InMemoryProductRepository::new()));

        let result = service.execute(request("Mouse", Decimal::from(-1), 1)).await;

        assert!(matches!(result, Err(ProductError::InvalidPrice(_))));
    }

    #[tokio::test]
    async fn test_price_must_fit_two_decimal_places() {
        let repo = Arc::new(InMemoryProductRepository::new());
        let service = CreateProductService::new(repo.clone());

        let result = service.execute(request("Pen", Decimal::new(1999, 3), 1)).await;
        assert!(matches!(result, Err(ProductError::InvalidPrice(p)) if p == Decimal::new(1999, 3)));

        let result = service.execute(request("Yacht", Decimal::from(100_000_000), 1)).await;
        assert!(matches!(result, Err(ProductError::InvalidPrice(_))));

        assert_eq!(repo.find_by_name("Pen").await.unwrap(), None);

        // Trailing zeros do not count against the scale
        let product = service.execute(request("Pencil", Decimal::new(2500, 3), 1)).await.unwrap();
        assert_eq!(product.price, Decimal::new(25, 1));

        let product = service
            .execute(request("Boat", Decimal::new(9_999_999_999, 2), 1))
            .await
            .unwrap();
        assert_eq!(product.price, Decimal::new(9_999_999_999, 2));
    }

    /// Simulates a concurrent insert winning the race after the name check.
    struct RacingCatalog;

    #[async_trait::async_trait]
    impl ProductRepository for RacingCatalog {
        async fn find_all_by_id(&self, _ids: &[uuid::Uuid]) -> storefront_core::RepositoryResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn update_quantity(
            &self,
            _updates: &[storefront_shared::ProductQuantityUpdate],
        ) -> storefront_core::RepositoryResult<()> {
            Ok(())
        }

        async fn find_by_name(&self, _name: &str) -> storefront_core::RepositoryResult<Option<Product>> {
            Ok(None)
        }

        async fn create(&self, _product: &Product) -> storefront_core::RepositoryResult<Product> {
            Err(UniqueViolation("products_name_key".to_string()).into())
        }
    }

    #[tokio::test]
    async fn test_unique_violation_on_insert_is_already_exists() {
        let service = CreateProductService::new(Arc::new(RacingCatalog));

        let result = service.execute(request("Keyboard", Decimal::from(50), 1)).await;

        assert!(matches!(result, Err(ProductError::AlreadyExists(name)) if name == "Keyboard"));
    }
}
