pub mod error;
pub mod manager;
pub mod lookup;
pub mod orchestrator;

pub use error::{OrderError, QuantityShortfall};
pub use manager::InMemoryOrderRepository;
pub use lookup::FindOrderService;
pub use orchestrator::{CreateOrderRequest, OrderItemRequest, OrderOrchestrator};
