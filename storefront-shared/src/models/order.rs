use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::Customer;

/// A placed order. Created once and not modified by the creation flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Assemble a new order, assigning ids to the order and each line item.
    pub fn new(customer: Customer, items: Vec<NewOrderItem>) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let items = items
            .into_iter()
            .map(|item| OrderItem {
                id: Uuid::new_v4(),
                order_id: id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        Self {
            id,
            customer,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of `price * quantity` over all line items.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum()
    }
}

/// One product line within an order. `price` is the unit price captured when
/// the order was placed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: u32,
    pub price: Decimal,
}

/// Line item handed to the order store before ids are assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_links_items() {
        let customer = Customer::new("Ada", "ada@example.com");
        let product_id = Uuid::new_v4();
        let order = Order::new(
            customer.clone(),
            vec![NewOrderItem {
                product_id,
                quantity: 3,
                price: Decimal::new(1050, 2),
            }],
        );

        assert_eq!(order.customer, customer);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].order_id, order.id);
        assert_eq!(order.items[0].product_id, product_id);
        assert_eq!(order.total(), Decimal::new(3150, 2));
    }
}
