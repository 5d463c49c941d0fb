pub mod product;
pub mod inventory;

pub use product::{CreateProductRequest, CreateProductService, ProductError};
pub use inventory::{InMemoryProductRepository, InventoryError};
