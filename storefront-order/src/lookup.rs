use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;
use storefront_core::repository::OrderRepository;
use storefront_shared::Order;

use crate::error::OrderError;

/// Fetches a stored order with its customer and line items.
pub struct FindOrderService {
    orders: Arc<dyn OrderRepository>,
}

impl FindOrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    #[instrument(name = "find_order", skip(self))]
    pub async fn execute(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = self.orders.find_by_id(order_id).await?;
        if order.is_none() {
            debug!("Order not found");
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::InMemoryOrderRepository;
    use storefront_shared::Customer;

    #[tokio::test]
    async fn test_find_order() {
        let repo = Arc::new(InMemoryOrderRepository::new());
        let order = repo
            .create(&Customer::new("Ada", "ada@example.com"), vec![])
            .await
            .unwrap();
        let service = FindOrderService::new(repo);

        assert_eq!(service.execute(order.id).await.unwrap(), Some(order));
        assert!(service.execute(Uuid::new_v4()).await.unwrap().is_none());
    }
}
