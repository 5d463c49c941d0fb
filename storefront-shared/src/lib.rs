pub mod models;
pub mod pii;

pub use models::{Customer, NewOrderItem, Order, OrderItem, Product, ProductQuantityUpdate};
pub use pii::Masked;
