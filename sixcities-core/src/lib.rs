pub mod models;
pub mod payload;
pub mod repository;
pub mod service;

pub use models::{City, Good, Location, Offer, OfferType};
pub use payload::{CreateOffer, UpdateOffer, Validate};
pub use repository::{OfferRepository, StoreError};
pub use service::{DefaultOfferService, OfferService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Persistence failure: {0}")]
    PersistenceError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(reason) => CoreError::ValidationError(reason),
            StoreError::Backend(source) => CoreError::PersistenceError(source),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
