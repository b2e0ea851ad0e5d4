use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Offer;
use crate::payload::{CreateOffer, UpdateOffer};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store refused the document (constraint violation and the like)
    #[error("Document rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Storage model for offers. Every method is a single round trip to the
/// backing store.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Persist a new offer; the store assigns its id
    async fn create(&self, payload: CreateOffer) -> Result<Offer, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError>;

    /// All offers, newest `post_date` first
    async fn find_all(&self) -> Result<Vec<Offer>, StoreError>;

    /// Premium offers whose city name equals `city_id`, newest first
    async fn find_premium_by_city(&self, city_id: &str) -> Result<Vec<Offer>, StoreError>;

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &UpdateOffer,
    ) -> Result<Option<Offer>, StoreError>;

    /// Returns the removed offer, or `None` when nothing matched
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError>;
}
