use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use storefront_core::repository::{CustomerRepository, OrderRepository, ProductRepository};
use storefront_shared::{NewOrderItem, Order, Product, ProductQuantityUpdate};

use crate::error::{OrderError, QuantityShortfall};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub products: Vec<OrderItemRequest>,
}

/// One requested product. `quantity` is expected to be positive.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OrderItemRequest {
    pub id: Uuid,
    pub quantity: u32,
}

/// Places orders against the catalog.
///
/// Collaborators are called strictly one after another: customer lookup,
/// product lookup, order write, stock update. The order write and the stock
/// update are separate calls with no transaction around them. If the update
/// fails, the order stays persisted with stock not decremented; the failure is
/// logged with the order id and returned to the caller.
pub struct OrderOrchestrator {
    customers: Arc<dyn CustomerRepository>,
    products: Arc<dyn ProductRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl OrderOrchestrator {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    /// Validate the request against the catalog, persist the order, then
    /// decrement stock.
    ///
    /// Line item prices are copied from the catalog at lookup time. Calling
    /// this twice with the same request places two orders.
    #[instrument(
        name = "create_order",
        skip(self, request),
        fields(customer_id = %request.customer_id, items = request.products.len())
    )]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let customer = match self.customers.find_by_id(request.customer_id).await? {
            Some(customer) => customer,
            None => {
                warn!("Customer not found");
                return Err(OrderError::InvalidCustomer);
            }
        };

        let ids: Vec<Uuid> = request.products.iter().map(|item| item.id).collect();
        let snapshots = self.products.find_all_by_id(&ids).await?;

        if snapshots.is_empty() {
            warn!("None of the requested products exist");
            return Err(OrderError::NoProductsFound);
        }

        // Pair every requested item with its snapshot (first match wins).
        let mut lines: Vec<(&OrderItemRequest, &Product)> = Vec::with_capacity(request.products.len());
        let mut missing = Vec::new();
        for item in &request.products {
            match snapshots.iter().find(|product| product.id == item.id) {
                Some(product) => lines.push((item, product)),
                None => missing.push(item.id),
            }
        }

        if !missing.is_empty() {
            warn!(missing = missing.len(), "Requested products not found");
            return Err(OrderError::ProductNotFound(missing));
        }

        let shortfalls: Vec<QuantityShortfall> = lines
            .iter()
            .filter(|(item, product)| item.quantity > product.quantity)
            .map(|(item, product)| QuantityShortfall {
                product_id: item.id,
                requested: item.quantity,
                available: product.quantity,
            })
            .collect();

        if !shortfalls.is_empty() {
            warn!(short = shortfalls.len(), "Insufficient quantity for requested products");
            return Err(OrderError::InsufficientQuantity(shortfalls));
        }

        let items = lines
            .iter()
            .map(|(item, product)| NewOrderItem {
                product_id: item.id,
                quantity: item.quantity,
                price: product.price,
            })
            .collect();

        let order = self.orders.create(&customer, items).await?;
        info!(order_id = %order.id, "Order persisted");

        let updates: Vec<ProductQuantityUpdate> = lines
            .iter()
            .map(|(item, product)| ProductQuantityUpdate {
                id: item.id,
                quantity: product.quantity - item.quantity,
            })
            .collect();

        if let Err(e) = self.products.update_quantity(&updates).await {
            error!(order_id = %order.id, error = %e, "Order persisted but stock was not decremented");
            return Err(e.into());
        }

        info!(order_id = %order.id, total = %order.total(), "Order created successfully");
        Ok(order)
    }
}
