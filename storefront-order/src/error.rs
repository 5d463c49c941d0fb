use std::fmt;
use uuid::Uuid;
use storefront_core::repository::RepositoryError;

/// Failures of the order flows.
///
/// Everything except `Repository` is a validation failure the caller can fix.
/// `Repository` carries a storage fault through untouched.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Customer does not exist")]
    InvalidCustomer,

    #[error("There are no products with these IDs")]
    NoProductsFound,

    #[error("Product not found: {}", join(.0))]
    ProductNotFound(Vec<Uuid>),

    #[error("Insufficient quantity for product: {}", join(.0))]
    InsufficientQuantity(Vec<QuantityShortfall>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl OrderError {
    /// True for the failures caused by the request itself.
    pub fn is_validation(&self) -> bool {
        !matches!(self, OrderError::Repository(_))
    }
}

/// A requested line whose quantity exceeds what the catalog has on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityShortfall {
    pub product_id: Uuid,
    pub requested: u32,
    pub available: u32,
}

impl fmt::Display for QuantityShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (requested {}, available {})",
            self.product_id, self.requested, self.available
        )
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
