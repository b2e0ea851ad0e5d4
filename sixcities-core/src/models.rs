use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::payload::CreateOffer;

/// The six cities an offer can be listed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Paris => "Paris",
            City::Cologne => "Cologne",
            City::Brussels => "Brussels",
            City::Amsterdam => "Amsterdam",
            City::Hamburg => "Hamburg",
            City::Dusseldorf => "Dusseldorf",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Apartment,
    House,
    Room,
    Hotel,
}

/// Amenities available at the property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Good {
    Breakfast,
    #[serde(rename = "Air conditioning")]
    AirConditioning,
    #[serde(rename = "Laptop friendly workspace")]
    LaptopFriendlyWorkspace,
    #[serde(rename = "Baby seat")]
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rental listing. `created_at`/`updated_at` are bookkeeping owned by the
/// store and are never part of a response projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offer {
    /// Build the stored entity for a freshly assigned id
    pub fn new(id: Uuid, payload: CreateOffer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            post_date: payload.post_date.unwrap_or(now),
            city: payload.city,
            preview_image: payload.preview_image,
            images: payload.images,
            is_premium: payload.is_premium,
            rating: payload.rating,
            offer_type: payload.offer_type,
            bedrooms: payload.bedrooms,
            max_adults: payload.max_adults,
            price: payload.price,
            goods: payload.goods,
            host_id: payload.host_id,
            comment_count: 0,
            location: payload.location,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_premium_in(&self, city_id: &str) -> bool {
        self.is_premium && self.city.as_str() == city_id
    }
}
