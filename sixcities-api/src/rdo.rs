//! Response projections of [`Offer`]. List endpoints return the preview
//! shape, single-offer endpoints the full one. Store bookkeeping fields
//! (`createdAt`, `updatedAt`) never appear in either.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sixcities_core::{City, Good, Location, Offer, OfferType};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferPreviewRdo {
    pub id: Uuid,
    pub title: String,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub is_premium: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub price: u32,
    pub comment_count: u32,
    pub location: Location,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferRdo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub is_premium: bool,
    pub rating: f64,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub bedrooms: u32,
    pub max_adults: u32,
    pub price: u32,
    pub goods: Vec<Good>,
    pub host_id: Uuid,
    pub comment_count: u32,
    pub location: Location,
}

pub fn to_preview(offer: &Offer) -> OfferPreviewRdo {
    OfferPreviewRdo {
        id: offer.id,
        title: offer.title.clone(),
        post_date: offer.post_date,
        city: offer.city,
        preview_image: offer.preview_image.clone(),
        is_premium: offer.is_premium,
        rating: offer.rating,
        offer_type: offer.offer_type,
        price: offer.price,
        comment_count: offer.comment_count,
        location: offer.location,
    }
}

pub fn to_full(offer: &Offer) -> OfferRdo {
    OfferRdo {
        id: offer.id,
        title: offer.title.clone(),
        description: offer.description.clone(),
        post_date: offer.post_date,
        city: offer.city,
        preview_image: offer.preview_image.clone(),
        images: offer.images.clone(),
        is_premium: offer.is_premium,
        rating: offer.rating,
        offer_type: offer.offer_type,
        bedrooms: offer.bedrooms,
        max_adults: offer.max_adults,
        price: offer.price,
        goods: offer.goods.clone(),
        host_id: offer.host_id,
        comment_count: offer.comment_count,
        location: offer.location,
    }
}

pub fn to_previews(offers: &[Offer]) -> Vec<OfferPreviewRdo> {
    offers.iter().map(to_preview).collect()
}
