use async_trait::async_trait;
use chrono::Utc;
use sixcities_core::{CreateOffer, Offer, OfferRepository, StoreError, UpdateOffer};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local storage model. Same ordering and filtering rules as the
/// Postgres store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryOfferRepository {
    offers: RwLock<HashMap<Uuid, Offer>>,
}

impl InMemoryOfferRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut offers: Vec<Offer>) -> Vec<Offer> {
    offers.sort_by(|a, b| b.post_date.cmp(&a.post_date));
    offers
}

#[async_trait]
impl OfferRepository for InMemoryOfferRepository {
    async fn create(&self, payload: CreateOffer) -> Result<Offer, StoreError> {
        let offer = Offer::new(Uuid::new_v4(), payload, Utc::now());
        self.offers.write().await.insert(offer.id, offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Offer>, StoreError> {
        let offers = self.offers.read().await.values().cloned().collect();
        Ok(newest_first(offers))
    }

    async fn find_premium_by_city(&self, city_id: &str) -> Result<Vec<Offer>, StoreError> {
        let offers = self
            .offers
            .read()
            .await
            .values()
            .filter(|offer| offer.is_premium_in(city_id))
            .cloned()
            .collect();
        Ok(newest_first(offers))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        update: &UpdateOffer,
    ) -> Result<Option<Offer>, StoreError> {
        let mut offers = self.offers.write().await;
        Ok(offers.get_mut(&id).map(|offer| {
            update.apply_to(offer, Utc::now());
            offer.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Offer>, StoreError> {
        Ok(self.offers.write().await.remove(&id))
    }
}
