pub mod customers;
pub mod repository;

pub use customers::{CreateCustomerRequest, CreateCustomerService, CustomerError, InMemoryCustomerRepository};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, RepositoryError, RepositoryResult, UniqueViolation};
