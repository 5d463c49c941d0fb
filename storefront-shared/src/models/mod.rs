//! Records shared by every crate in the workspace.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use order::{NewOrderItem, Order, OrderItem};
pub use product::{Product, ProductQuantityUpdate};
