use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::Offer;
use crate::payload::{CreateOffer, UpdateOffer};
use crate::repository::OfferRepository;
use crate::CoreResult;

/// Offer persistence operations as seen by the HTTP layer.
///
/// Ids are opaque strings: one that is not a well-formed UUID cannot name a
/// stored offer, so lookups treat it as absent instead of failing.
#[async_trait]
pub trait OfferService: Send + Sync {
    async fn create(&self, payload: CreateOffer) -> CoreResult<Offer>;
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Offer>>;
    async fn find_all(&self) -> CoreResult<Vec<Offer>>;
    async fn find_premium_offers(&self, city_id: &str) -> CoreResult<Vec<Offer>>;
    async fn update_by_id(&self, id: &str, update: UpdateOffer) -> CoreResult<Option<Offer>>;
    async fn delete_by_id(&self, id: &str) -> CoreResult<Option<Offer>>;
}

pub struct DefaultOfferService {
    model: Arc<dyn OfferRepository>,
}

impl DefaultOfferService {
    pub fn new(model: Arc<dyn OfferRepository>) -> Self {
        Self { model }
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

#[async_trait]
impl OfferService for DefaultOfferService {
    async fn create(&self, payload: CreateOffer) -> CoreResult<Offer> {
        let offer = self.model.create(payload).await?;
        info!("New offer created: {} ({})", offer.title, offer.city);
        Ok(offer)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Offer>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.model.find_by_id(id).await?)
    }

    async fn find_all(&self) -> CoreResult<Vec<Offer>> {
        Ok(self.model.find_all().await?)
    }

    async fn find_premium_offers(&self, city_id: &str) -> CoreResult<Vec<Offer>> {
        Ok(self.model.find_premium_by_city(city_id).await?)
    }

    async fn update_by_id(&self, id: &str, update: UpdateOffer) -> CoreResult<Option<Offer>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let updated = self.model.update_by_id(id, &update).await?;
        if updated.is_some() {
            info!("Offer {} updated", id);
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> CoreResult<Option<Offer>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let deleted = self.model.delete_by_id(id).await?;
        if deleted.is_some() {
            info!("Offer {} deleted", id);
        }
        Ok(deleted)
    }
}
